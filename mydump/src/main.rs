// mydump/src/main.rs

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mydump_core::infrastructure::reporter::TracingReporter;

mod cli;
mod commands;

use cli::{Cli, normalize_args, wants_usage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug mydump ... to follow every phase of the run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if wants_usage(&args) {
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
        std::process::exit(1);
    }

    let cli = match Cli::try_parse_from(normalize_args(args)) {
        Ok(cli) => cli,
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion => {
            e.print().context("Failed to print version")?;
            return Ok(());
        }
        Err(e) => {
            e.print().context("Failed to print argument error")?;
            std::process::exit(1);
        }
    };

    match commands::dump::execute(cli, &TracingReporter).await {
        Ok(path) => {
            println!("✨ Dump written to {}", path.display());
        }
        Err(e) => {
            tracing::error!("Run aborted");
            eprintln!("❌ {:?}", miette::Report::new(e));
            // Exit with error code for scripts and cron wrappers
            std::process::exit(1);
        }
    }

    Ok(())
}
