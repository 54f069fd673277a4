//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `validate`: Validate a legacy catalogue
//! - `resolve`: Resolve one unified property from configuration files
//! - `check`: Resolve every catalogue entry and report problems
//! - `show_legacy`: List the legacy keys of a unified property
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod resolve;
pub mod show_legacy;
pub mod validate;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use resolve::ResolveCommand;
pub use show_legacy::ShowLegacyCommand;
pub use validate::ValidateCommand;
