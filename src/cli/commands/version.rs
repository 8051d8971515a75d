//! Version command implementation

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    output.result(&format!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));

    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"));
    output.key_value("License:", env!("CARGO_PKG_LICENSE"));
    output.key_value("Target:", std::env::consts::ARCH);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
    );
    Ok(())
}
