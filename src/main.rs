//! Trailheat - foot-traffic estimation over forest road networks
//!
//! Loads a road graph, runs one engine operation and prints the result.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use trailheat_core::error::{ExitCode as TrailheatExitCode, TrailheatError};
use trailheat_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // `cli.format` is unknown until parsing succeeds
            let format = requested_format(env::args().skip(1)).unwrap_or_default();
            if format == OutputFormat::Human {
                err.exit();
            }
            return report(&TrailheatError::UsageError(err.to_string()), format, false);
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), command = ?cli.command, "parsed arguments");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(TrailheatExitCode::Success as u8),
        Err(e) => report(&e, cli.format, cli.quiet),
    }
}

/// Prints `error` in the requested format and maps it to its exit code
fn report(error: &TrailheatError, format: OutputFormat, quiet: bool) -> ExitCode {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    ExitCode::from(error.exit_code() as u8)
}

/// Last `--format` value on the raw command line, if it names a format
fn requested_format(args: impl IntoIterator<Item = String>) -> Option<OutputFormat> {
    let mut args = args.into_iter();
    let mut format = None;
    while let Some(arg) = args.next() {
        let value = match arg.strip_prefix("--format") {
            Some("") => args.next(),
            Some(rest) => rest.strip_prefix('=').map(str::to_string),
            None => continue,
        };
        if let Some(parsed) = value.and_then(|v| v.parse::<OutputFormat>().ok()) {
            format = Some(parsed);
        }
    }
    format
}
