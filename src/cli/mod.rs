//! Command-line interface for strproc
//!
//! Processor types come from configuration. Each subcommand lives in its own
//! module under `commands`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use crate::config::StrprocConfig;

/// strproc - ordered string filter pipelines
#[derive(Parser)]
#[command(name = "strproc", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true, env = "STRPROC_CONFIG_FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a processor to strings
    Run(commands::run::RunArgs),
    /// List configured processors and their filters
    List(commands::list::ListArgs),
    /// List builtin filters
    Filters,
    /// Configuration management
    Config(commands::config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let (verbose, quiet) = (self.verbose > 0, self.quiet);
        let custom_config = self.config.as_deref();
        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let load = || -> Result<(StrprocConfig, Output)> {
            let config = StrprocConfig::load(custom_config)?;
            let output = Output::new(verbose, quiet, config.output.color);
            Ok((config, output))
        };

        match command {
            Commands::Run(args) => {
                let (config, output) = load()?;
                commands::run::execute(args, &config, &output)
            }
            Commands::List(args) => {
                let (config, output) = load()?;
                commands::list::execute(args, &config, &output)
            }
            Commands::Filters => commands::filters::execute(&Output::new(verbose, quiet, true)),
            // Works even when the merged configuration is broken
            Commands::Config(args) => {
                commands::config::execute(args, custom_config, &Output::new(verbose, quiet, true))
            }
            Commands::Version => commands::version::execute(&Output::new(verbose, quiet, true)),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so processed output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
