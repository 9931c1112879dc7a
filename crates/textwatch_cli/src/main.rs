//! textwatch CLI
//!
//! Finds text rendered outside `<Text/>` (or a configured custom text
//! component) in React Native JSX/TSX code.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_check, run_components, run_lsp, run_severity};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_findings) => {
            if has_findings {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check { patterns, format } => run_check(cli, patterns, *format),
        Commands::Lsp => run_lsp().map(|_| false),
        Commands::Components { command } => run_components(cli, command).map(|_| false),
        Commands::Severity { name } => run_severity(cli, name.as_deref()).map(|_| false),
    }
}
