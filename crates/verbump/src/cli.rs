//! CLI definition.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Bump versions in project files, detect version ranges from git history
/// and release them.
#[derive(Debug, Parser)]
#[command(name = "verbump")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bump versions in the configured files
    #[command(visible_alias = "bv")]
    Bump(commands::bump::BumpArgs),

    /// List available configuration presets
    Presets,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<ExitCode> {
        match self.command {
            Commands::Bump(args) => commands::bump::run(args),
            Commands::Presets => commands::presets::run(),
        }
    }
}
