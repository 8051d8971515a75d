//! Run command implementation
//!
//! Applies one configured processor to each input string.

use crate::cli::Output;
use crate::config::StrprocConfig;
use crate::filter::FilterRegistry;
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Processor to apply (defaults to `default_processor` from config)
    #[arg(short, long)]
    pub processor: Option<String>,

    /// Read input lines from a file instead of stdin
    #[arg(short, long, value_name = "PATH", conflicts_with = "inputs")]
    pub file: Option<PathBuf>,

    /// Strings to process; each is processed independently
    pub inputs: Vec<String>,
}

/// Execute the run command
pub fn execute(args: RunArgs, config: &StrprocConfig, output: &Output) -> Result<()> {
    let registry = FilterRegistry::builtin();
    let name = args
        .processor
        .as_deref()
        .unwrap_or(&config.default_processor);

    let processor = config.processor_type(name, &registry)?.instance(());
    output.verbose(&format!(
        "Processor '{}': {}",
        name,
        processor.kind().filter_names().collect::<Vec<_>>().join(" -> ")
    ));

    let inputs = read_inputs(args.inputs, args.file)?;
    tracing::debug!("Processing {} inputs with '{}'", inputs.len(), name);

    let results = processor.process_all(&inputs)?;
    for line in &results {
        output.result(line);
    }

    Ok(())
}

fn read_inputs(inputs: Vec<String>, file: Option<PathBuf>) -> Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    match file {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            let content = std::str::from_utf8(&bytes)
                .map_err(crate::FilterError::from)
                .with_context(|| format!("Input file is not text: {}", path.display()))?;
            Ok(content.lines().map(str::to_string).collect())
        }
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read input from stdin"),
    }
}
