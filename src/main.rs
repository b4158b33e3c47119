mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    let directive = format!("backtail={}", cli.log_level(&settings.log.level))
        .parse()
        .context("Invalid log.level")?;

    // stdout carries command output only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let stdout = std::io::stdout();
    cli::run(cli, &settings, &mut stdout.lock())
}
