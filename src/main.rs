//! Sound Processor CLI
//!
//! Command-line entry point. This is the only place that turns errors into
//! messages and exit codes.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use sound_processor::cli::{process, Cli};

/// Exit code for malformed command lines
const USAGE_EXIT_CODE: u8 = 1;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE),
            };
        }
    };

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Sound Processor v{}", env!("CARGO_PKG_VERSION"));

    match process(&cli.request()) {
        Ok(summary) => {
            if cli.dry_run {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(err) => error!("Cannot print run summary: {}", err),
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("[{}] {}", err.error_code(), err);
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
