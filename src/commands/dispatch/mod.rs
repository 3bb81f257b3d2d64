//! Command dispatch logic for trailheat

use std::time::Instant;

use crate::cli::Cli;
use trailheat_core::error::Result;
use tracing::debug;

pub(crate) mod command;
mod commands;

use command::{load_config, Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;

    debug!(elapsed = ?start.elapsed(), "load_config");

    let ctx = CommandContext::new(cli, &config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
