//! Configuration command implementations

use crate::cli::Output;
use crate::config::{ConfigFormat, StrprocConfig, get_value};
use crate::filter::FilterRegistry;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format: toml or json
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Get a configuration value by dotted key
    Get { key: String },
    /// Validate the merged configuration
    Validate,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let format: ConfigFormat = format.parse()?;
            let config = StrprocConfig::load(custom_config)?;
            output.result(&config.export(format)?);
        }
        ConfigCommand::Get { key } => {
            let value = get_value(custom_config, &key)?;
            match value {
                serde_json::Value::String(s) => output.result(&s),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    output.result(&serde_json::to_string_pretty(&value)?)
                }
                other => output.result(&other.to_string()),
            }
        }
        ConfigCommand::Validate => {
            let config = StrprocConfig::load(custom_config)?;
            if let Err(err) = config.validate(&FilterRegistry::builtin()) {
                output.error("Configuration is invalid");
                return Err(err);
            }

            output.success("Configuration is valid");
            output.key_value("Processors:", &config.processors.len().to_string());
            output.key_value("Default processor:", &config.default_processor);
        }
    }

    Ok(())
}
