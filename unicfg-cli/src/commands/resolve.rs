//! Command to resolve one unified property.

use crate::error::CliError;
use crate::utils::{load_registry, load_source, parse_default, print_json, GlobalOptions};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use unicfg::coerce::{TargetType, Value};
use unicfg::{CompatibilityMode, Resolver};

/// Resolve one unified property from configuration files and the environment.
#[derive(Args)]
pub struct ResolveCommand {
    /// Unified property key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Configuration file (`.yaml`/`.yml` or properties); later files win
    #[arg(short, long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,

    /// Read environment variables with this prefix (e.g. CAMUNDA, ZEEBE)
    #[arg(long = "env-prefix", value_name = "PREFIX")]
    pub env_prefixes: Vec<String>,

    /// Target type: string, bool, integer, float, duration, bytes,
    /// enum:A|B, list:<type> or set:<type>
    #[arg(long = "type", value_name = "TYPE", default_value = "string")]
    pub target: TargetType,

    /// Whether legacy keys may still supply the value
    #[arg(long, value_enum, default_value_t = CompatibilityMode::Supported)]
    pub mode: CompatibilityMode,

    /// Require unified and legacy values to match
    #[arg(long)]
    pub require_match: bool,

    /// Value used when nothing is configured
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    key: &'a str,
    value: &'a Value,
    mode: CompatibilityMode,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = load_registry(global)?;
        let source = load_source(&self.configs, &self.env_prefixes)?;
        let resolver = Resolver::new(source, registry).with_profiles(global.active_profiles());

        let mut property = resolver.property(&self.key)?.mode(self.mode);
        if self.require_match {
            property = property.require_match();
        }

        let mut request = property.to_request(self.target.clone())?;
        if let Some(default) = &self.default {
            request = request.with_default(parse_default(property.key(), default, &self.target)?);
        }

        let value = resolver.resolve(&request)?;

        if self.json {
            print_json(&Resolution {
                key: property.key().as_str(),
                value: &value,
                mode: self.mode,
            })
        } else {
            println!("{value}");
            Ok(())
        }
    }
}
