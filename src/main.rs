//! Recipe Finder - find recipes for the ingredients you have
//!
//! Looks up recipes in the local cache first and falls back to the
//! Spoonacular API, then prints a short report for each recipe.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use recipe_finder::app;
use recipe_finder::cli::{Cli, StartupConfig};

/// Exit code for invalid arguments, matching clap's own usage errors
const USAGE_EXIT_CODE: u8 = 2;

/// Sends logs to stderr so stdout carries only the report.
/// Verbosity comes from `RUST_LOG` and defaults to warnings.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    let mut stdout = io::stdout().lock();
    match app::run(&config, &mut stdout).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
