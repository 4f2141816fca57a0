//! ScriptLint CLI
//!
//! Pluggable linter for JavaScript sources.

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use scriptlint_core::Engine;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

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
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let engine = Engine::new(cli.run_options()).into_diagnostic()?;
    let report = engine.execute_on_files(&cli.paths);

    println!(
        "{}",
        serde_json::to_string_pretty(&report).into_diagnostic()?
    );
    Ok(())
}
