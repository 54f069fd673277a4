//! Command to list the legacy keys of a unified property.

use crate::error::CliError;
use crate::utils::{load_registry, parse_key, print_json, GlobalOptions};
use clap::Args;
use serde::Serialize;
use unicfg::catalogue::LegacyAlias;
use unicfg::Profile;

/// List the legacy keys of a unified property.
///
/// Without `--all`, only the keys eligible under the active profiles are
/// shown.
#[derive(Args)]
pub struct ShowLegacyCommand {
    /// Unified property key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Show every alias with its profiles, regardless of the active profiles
    #[arg(long)]
    pub all: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    unified: &'a str,
    legacy: Vec<&'a LegacyAlias>,
}

impl ShowLegacyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key = parse_key(&self.key)?;
        let registry = load_registry(global)?;
        let profiles = global.active_profiles();

        let Some(mapping) = registry.get(&key) else {
            return Err(CliError::SemanticFailure(format!(
                "No legacy catalogue entry for '{key}'"
            )));
        };

        let aliases: Vec<&LegacyAlias> = mapping
            .legacy
            .iter()
            .flat_map(|group| group.aliases.iter())
            .filter(|alias| self.all || alias.applies_to(&profiles))
            .collect();

        if self.json {
            return print_json(&Listing {
                unified: mapping.unified.as_str(),
                legacy: aliases,
            });
        }

        for alias in aliases {
            if self.all && !alias.profiles.is_empty() {
                let names: Vec<&str> = alias.profiles.iter().map(Profile::as_str).collect();
                println!("{} [{}]", alias.key, names.join(", "));
            } else {
                println!("{}", alias.key);
            }
        }
        Ok(())
    }
}
