//! Library exports for unicfg-cli.
//!
//! This module exports the CLI structure so integration tests and the
//! build script can share its definitions.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

// Re-export CLI for tests and documentation tooling
pub use cli::Cli;
