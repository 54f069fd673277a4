//! Common test utilities for integration tests.
//!
//! This module provides fixture paths, a recording deprecation sink and
//! resolver builders shared by the integration tests.

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use unicfg::catalogue::MappingRegistry;
use unicfg::resolve::{DeprecationSink, Resolver};
use unicfg::source::MapSource;
use unicfg::{Profiles, PropertyKey};

/// Returns the path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Builds a source from literal pairs.
#[allow(dead_code)]
pub fn source(pairs: &[(&str, &str)]) -> MapSource {
    MapSource::from_pairs(pairs.iter().copied()).unwrap()
}

/// Builds a resolver over the bundled catalogue with the given profiles.
#[allow(dead_code)]
pub fn bundled_resolver(pairs: &[(&str, &str)], profiles: &str) -> Resolver<MapSource> {
    Resolver::new(source(pairs), MappingRegistry::bundled().unwrap())
        .with_profiles(Profiles::parse(profiles))
}

/// A deprecation notice captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub unified: String,
    pub legacy: Vec<String>,
}

/// Collects deprecation notices for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl DeprecationSink for RecordingSink {
    fn legacy_used(&self, unified_key: &PropertyKey, legacy_keys: &[PropertyKey]) {
        self.notices.lock().unwrap().push(Notice {
            unified: unified_key.to_string(),
            legacy: legacy_keys.iter().map(ToString::to_string).collect(),
        });
    }
}

/// RAII guard for setting and restoring environment variables.
///
/// Tests using it must be marked `#[serial]`.
#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    pub fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}
