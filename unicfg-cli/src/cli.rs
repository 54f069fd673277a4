//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CheckCommand, CompletionsCommand, ResolveCommand, ShowLegacyCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for checking legacy and unified configuration properties.
#[derive(Parser)]
#[command(name = "unicfg")]
#[command(version, about = "Resolve unified configuration properties and their legacy aliases", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output, including deprecation warnings
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Legacy catalogue to use instead of the bundled one
    #[arg(long, value_name = "PATH", global = true, env = "UNICFG_CATALOGUE")]
    pub catalogue: Option<PathBuf>,

    /// Active runtime profile (repeatable or comma separated)
    #[arg(
        long = "profile",
        value_name = "NAME",
        global = true,
        env = "UNICFG_PROFILES",
        value_delimiter = ','
    )]
    pub profiles: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a legacy catalogue
    Validate(ValidateCommand),

    /// Resolve one unified property
    Resolve(ResolveCommand),

    /// Resolve every catalogue entry and report legacy usage and conflicts
    Check(CheckCommand),

    /// List the legacy keys of a unified property
    ShowLegacy(ShowLegacyCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
