//! Main entry point for the unicfg CLI.
//!
//! This is the command-line interface for the unicfg resolution engine.
//! It provides commands for inspecting configurations during the move from
//! legacy to unified properties:
//! - `validate`: Validate a legacy catalogue
//! - `resolve`: Resolve one unified property
//! - `check`: Report legacy usage and conflicts across the catalogue
//! - `show-legacy`: List the legacy keys of a unified property
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity; deprecation warnings go
    // through the `log` facade
    let logger = unicfg::init_logger(cli.verbose, cli.quiet);
    if logger.install().is_err() {
        logger.debug("A global logger is already installed");
    }

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        catalogue: cli.catalogue,
        profiles: cli.profiles,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Check(cmd) => cmd.execute(&global),
        cli::Command::ShowLegacy(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
