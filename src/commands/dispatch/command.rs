//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use trailheat_core::config::AnalysisConfig;
use trailheat_core::error::Result;
use trailheat_core::graph::io::{read_graph_file, GraphFile};

/// Configuration from `--config`, or the defaults
pub fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    match &cli.config {
        Some(path) => AnalysisConfig::load(path),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: &'a AnalysisConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: &'a AnalysisConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    pub fn read_graph(&self, path: &Path) -> Result<GraphFile> {
        let file = read_graph_file(path)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), path = %path.display(), "read_graph");
        Ok(file)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("trailheat {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Foot-traffic estimation over forest road networks.");
        println!();
        println!("Run `trailheat --help` for usage information.");
        Ok(())
    }
}
