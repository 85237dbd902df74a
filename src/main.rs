//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_inspector` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cert_inspector::initialization::init_logger_with;
use cert_inspector::{exit_code, run_inspection, Config, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_inspection(&config).await {
        Ok(inspection) => {
            match config.output {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&inspection.report())
                        .context("Failed to serialize inspection report")?;
                    println!("{json}");
                }
                OutputFormat::Plain => print!("{}", inspection.render_text()),
            }
            Ok(())
        }
        Err(e) => {
            let code = exit_code(&e);
            let err =
                anyhow::Error::from(e).context(format!("Failed to inspect {}", config.domain));
            eprintln!("cert_inspector error: {:#}", err);
            process::exit(code);
        }
    }
}
