use crate::cli::Output;
use crate::filter::FilterRegistry;
use anyhow::Result;

/// Execute the filters command
pub fn execute(output: &Output) -> Result<()> {
    let registry = FilterRegistry::builtin();
    output.header("Builtin filters");
    for name in registry.names() {
        output.result(name);
    }
    Ok(())
}
