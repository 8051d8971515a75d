//! List command implementation
//!
//! Shows every configured processor type with its filters in order.

use crate::cli::Output;
use crate::config::StrprocConfig;
use crate::filter::FilterRegistry;
use anyhow::Result;
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct ListArgs {
    /// Output format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
struct ProcessorSummary<'a> {
    name: &'a str,
    filters: Vec<&'a str>,
    default: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs, config: &StrprocConfig, output: &Output) -> Result<()> {
    let registry = FilterRegistry::builtin();
    let kinds = config.processor_types(&registry)?;

    let summaries: Vec<ProcessorSummary> = kinds
        .iter()
        .map(|kind| ProcessorSummary {
            name: kind.name(),
            filters: kind.filter_names().collect(),
            default: kind.name() == config.default_processor,
        })
        .collect();

    match args.format.to_lowercase().as_str() {
        "json" => output.result(&serde_json::to_string_pretty(&summaries)?),
        "text" => {
            output.header("Processors");
            for summary in &summaries {
                let marker = if summary.default { " (default)" } else { "" };
                output.category(&format!("{}{}", summary.name, marker));
                if summary.filters.is_empty() {
                    output.list_item("(identity)");
                }
                for (position, filter) in summary.filters.iter().enumerate() {
                    output.list_item(&format!("{}. {}", position + 1, filter));
                }
            }
        }
        other => anyhow::bail!("Unsupported format: {}. Use text or json", other),
    }

    Ok(())
}
