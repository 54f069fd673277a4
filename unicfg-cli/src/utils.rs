//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including catalogue loading, profile handling, property source
//! assembly and output formatting.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use unicfg::coerce::{coerce_text, TargetType, Value};
use unicfg::source::{LayeredSource, MapSource};
use unicfg::{MappingRegistry, Profiles, PropertyKey};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Catalogue overriding the bundled one.
    pub catalogue: Option<PathBuf>,

    /// Active runtime profiles as given on the command line.
    pub profiles: Vec<String>,
}

impl GlobalOptions {
    /// Returns the active profiles.
    pub fn active_profiles(&self) -> Profiles {
        Profiles::parse(&self.profiles.join(","))
    }
}

/// Load the legacy catalogue: the `--catalogue` file if given, otherwise the
/// bundled one.
pub fn load_registry(global: &GlobalOptions) -> Result<MappingRegistry, CliError> {
    match &global.catalogue {
        Some(path) => {
            ensure_exists(path)?;
            MappingRegistry::from_file(path).map_err(CliError::from)
        }
        None => MappingRegistry::bundled().map_err(CliError::from),
    }
}

/// Assemble the property source of a command.
///
/// Environment variables with one of `env_prefixes` take precedence over
/// every file; among the files, later ones take precedence over earlier
/// ones.
pub fn load_source(configs: &[PathBuf], env_prefixes: &[String]) -> Result<LayeredSource, CliError> {
    let mut source = LayeredSource::new();

    if !env_prefixes.is_empty() {
        let prefixes: Vec<&str> = env_prefixes.iter().map(String::as_str).collect();
        source.push(MapSource::from_process_env(&prefixes));
    }

    for path in configs.iter().rev() {
        ensure_exists(path)?;
        source.push(MapSource::from_file(path)?);
    }

    Ok(source)
}

/// Parse a property key given on the command line.
pub fn parse_key(raw: &str) -> Result<PropertyKey, CliError> {
    PropertyKey::new(raw).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Coerce a `--default` value given on the command line.
pub fn parse_default(key: &PropertyKey, raw: &str, target: &TargetType) -> Result<Value, CliError> {
    coerce_text(key, raw, target).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Print a value as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use unicfg::source::{PropertySource, RawValue};

    #[test]
    fn test_active_profiles() {
        let global = GlobalOptions {
            profiles: vec!["Broker".into(), "gateway, operate".into()],
            ..GlobalOptions::default()
        };
        let profiles = global.active_profiles();
        assert_eq!(profiles.iter().count(), 3);
    }

    #[test]
    fn test_later_files_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.properties");
        let overrides = dir.path().join("override.yaml");
        fs::write(&base, "camunda.cluster.size=3\ncamunda.cluster.node-id=0\n").unwrap();
        fs::write(&overrides, "camunda:\n  cluster:\n    size: 5\n").unwrap();

        let source = load_source(&[base, overrides], &[]).unwrap();
        let size = PropertyKey::new("camunda.cluster.size").unwrap();
        let node_id = PropertyKey::new("camunda.cluster.nodeId").unwrap();
        assert_eq!(source.raw_value(&size), Some(RawValue::Text("5".into())));
        assert_eq!(source.raw_value(&node_id), Some(RawValue::Text("0".into())));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(&[dir.path().join("missing.yaml")], &[]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_bundled_registry_by_default() {
        let registry = load_registry(&GlobalOptions::default()).unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_parse_default() {
        let key = parse_key("camunda.api.long-polling.timeout").unwrap();
        assert_eq!(
            parse_default(&key, "10s", &TargetType::Duration).unwrap(),
            Value::Duration(std::time::Duration::from_secs(10))
        );
        assert_eq!(
            parse_default(&key, "soon", &TargetType::Duration)
                .unwrap_err()
                .exit_code(),
            4
        );
        assert!(parse_key("camunda..timeout").is_err());
    }
}
