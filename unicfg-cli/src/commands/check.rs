//! Command to check a configuration against the whole catalogue.
//!
//! Every unified property of the catalogue is resolved in `Supported` mode.
//! Values are compared as the type the catalogue entry declares. Entries
//! without a declared type are compared as text, or as a list of text when
//! any of the keys carries indexed entries.

use crate::error::CliError;
use crate::utils::{load_registry, load_source, print_json, GlobalOptions};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use unicfg::catalogue::LegacyMapping;
use unicfg::coerce::TargetType;
use unicfg::source::{PropertySource, RawValue};
use unicfg::{DeprecationSink, PropertyKey, Resolver};

/// Resolve every catalogue entry and report legacy usage and conflicts.
#[derive(Args)]
pub struct CheckCommand {
    /// Configuration file (`.yaml`/`.yml` or properties); later files win
    #[arg(short, long = "config", value_name = "FILE", required = true)]
    pub configs: Vec<PathBuf>,

    /// Read environment variables with this prefix (e.g. CAMUNDA, ZEEBE)
    #[arg(long = "env-prefix", value_name = "PREFIX")]
    pub env_prefixes: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Legacy keys that supplied a unified property.
#[derive(Debug, Clone, Serialize)]
struct LegacyUsage {
    unified: String,
    legacy: Vec<String>,
}

/// A unified property that failed to resolve.
#[derive(Debug, Serialize)]
struct Problem {
    unified: String,
    error: String,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    checked: usize,
    legacy: Vec<LegacyUsage>,
    errors: Vec<Problem>,
}

/// Records deprecation notices instead of logging them.
#[derive(Debug, Default)]
struct UsageRecorder {
    used: Mutex<Vec<LegacyUsage>>,
}

impl UsageRecorder {
    fn take(&self) -> Vec<LegacyUsage> {
        self.used
            .lock()
            .map(|mut used| std::mem::take(&mut *used))
            .unwrap_or_default()
    }
}

impl DeprecationSink for UsageRecorder {
    fn legacy_used(&self, unified_key: &PropertyKey, legacy_keys: &[PropertyKey]) {
        if let Ok(mut used) = self.used.lock() {
            used.push(LegacyUsage {
                unified: unified_key.to_string(),
                legacy: legacy_keys.iter().map(ToString::to_string).collect(),
            });
        }
    }
}

impl CheckCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = load_registry(global)?;
        let source = load_source(&self.configs, &self.env_prefixes)?;
        let recorder = Arc::new(UsageRecorder::default());
        let resolver = Resolver::new(source, registry)
            .with_profiles(global.active_profiles())
            .with_sink(Arc::clone(&recorder));

        let mut report = Report::default();
        for mapping in resolver.registry().iter() {
            report.checked += 1;
            let target = check_target(resolver.source(), mapping);
            let outcome = resolver
                .property(mapping.unified.as_str())
                .and_then(|property| property.resolve(target));
            if let Err(e) = outcome {
                report.errors.push(Problem {
                    unified: mapping.unified.to_string(),
                    error: e.to_string(),
                });
            }
        }
        report.legacy = recorder.take();

        if self.json {
            print_json(&report)?;
        } else {
            for usage in &report.legacy {
                println!("legacy  {} <- {}", usage.unified, usage.legacy.join(", "));
            }
            for problem in &report.errors {
                println!("error   {}: {}", problem.unified, problem.error);
            }
            if !global.quiet {
                eprintln!(
                    "Checked {} properties: {} supplied by legacy keys, {} errors",
                    report.checked,
                    report.legacy.len(),
                    report.errors.len()
                );
            }
        }

        if report.errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{} properties failed to resolve",
                report.errors.len()
            )))
        }
    }
}

fn check_target<S: PropertySource>(source: &S, mapping: &LegacyMapping) -> TargetType {
    if let Some(declared) = &mapping.value_type {
        return declared.clone();
    }

    let indexed = std::iter::once(&mapping.unified)
        .chain(mapping.legacy_keys())
        .any(|key| matches!(source.raw_value(key), Some(RawValue::Indexed(_))));

    if indexed {
        TargetType::list_of(TargetType::String)
    } else {
        TargetType::String
    }
}
