//! Build script for unicfg-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("unicfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve unified configuration properties and their legacy aliases")
        .long_about(
            "Command-line tool for checking configurations while legacy properties move to a unified scheme",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output, including deprecation warnings")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("catalogue")
                .long("catalogue")
                .help("Legacy catalogue to use instead of the bundled one")
                .value_name("PATH")
                .global(true)
                .env("UNICFG_CATALOGUE"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .help("Active runtime profile (repeatable or comma separated)")
                .value_name("NAME")
                .global(true)
                .action(ArgAction::Append)
                .value_delimiter(',')
                .env("UNICFG_PROFILES"),
        )
        .subcommands(vec![
            Command::new("validate")
                .about("Validate a legacy catalogue")
                .long_about("Load a legacy catalogue and check its invariants"),
            Command::new("resolve")
                .about("Resolve one unified property")
                .long_about(
                    "Resolve a unified property from configuration files and the environment, \
                     honoring its legacy aliases",
                ),
            Command::new("check")
                .about("Resolve every catalogue entry and report legacy usage and conflicts")
                .long_about(
                    "Resolve every unified property of the catalogue and report which legacy \
                     keys are in use and which properties are ambiguous",
                ),
            Command::new("show-legacy")
                .about("List the legacy keys of a unified property")
                .long_about("Show the legacy keys that apply to a unified property under the active profiles"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main unicfg.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("unicfg.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
