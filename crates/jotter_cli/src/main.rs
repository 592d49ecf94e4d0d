//! jotter command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, resolve configuration and start file logging.
//! - Dispatch to one command handler and map failures to exit codes.

mod cli;
mod commands;
mod config;
mod web;

use clap::Parser;
use cli::Cli;
use config::AppConfig;
use jotter_core::NoteServiceError;
use std::process::ExitCode;

const EXIT_USER_ERROR: u8 = 1;
const EXIT_INTERNAL_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::resolve(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_INTERNAL_ERROR);
        }
    };

    if let Err(err) = jotter_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    match commands::run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=command module=cli status=error error={err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Validation failures are the caller's fault; everything else is internal.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<NoteServiceError>() {
        Some(inner) if inner.is_validation() => EXIT_USER_ERROR,
        _ => EXIT_INTERNAL_ERROR,
    }
}
