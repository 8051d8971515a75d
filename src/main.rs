use anyhow::Result;
use clap::Parser;
use strproc::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
