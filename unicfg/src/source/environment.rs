//! Environment variable handling for property sources.
//!
//! Environment variables name properties in upper snake case:
//! `CAMUNDA_API_LONGPOLLING_TIMEOUT` supplies
//! `camunda.api.long-polling.timeout`, and `CAMUNDA_DATA_URLS_0` supplies
//! the first indexed entry of `camunda.data.urls`. Dashes are dropped from
//! the canonical key form, which is what makes the two spellings meet.

use std::env;

use super::MapSource;
use crate::key::PropertyKey;

impl MapSource {
    /// Builds a source from environment variables whose names start with
    /// one of `prefixes` followed by `_`.
    ///
    /// Variables whose names do not form a valid key (for example `A__B`)
    /// are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::source::{MapSource, PropertySource, RawValue};
    /// use unicfg::PropertyKey;
    ///
    /// let source = MapSource::from_env_vars(
    ///     &["ZEEBE"],
    ///     [
    ///         ("ZEEBE_BROKER_CLUSTER_NODEID".to_string(), "7".to_string()),
    ///         ("HOME".to_string(), "/root".to_string()),
    ///     ],
    /// );
    ///
    /// assert_eq!(source.len(), 1);
    /// let key = PropertyKey::new("zeebe.broker.cluster.nodeId").unwrap();
    /// assert_eq!(source.raw_value(&key), Some(RawValue::Text("7".into())));
    /// ```
    pub fn from_env_vars<I>(prefixes: &[&str], vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut source = Self::new();

        for (name, value) in vars {
            if !Self::matches_prefix(prefixes, &name) {
                continue;
            }

            match Self::env_var_to_key(&name) {
                Some(key) => source.insert(key, value),
                None => log::debug!("Ignoring environment variable {name}: not a property key"),
            }
        }

        source
    }

    /// Builds a source from the current process environment.
    ///
    /// Variables with non-UTF-8 names or values are skipped.
    #[must_use]
    pub fn from_process_env(prefixes: &[&str]) -> Self {
        Self::from_env_vars(
            prefixes,
            env::vars_os().filter_map(|(name, value)| {
                Some((name.into_string().ok()?, value.into_string().ok()?))
            }),
        )
    }

    fn matches_prefix(prefixes: &[&str], name: &str) -> bool {
        prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('_');
            name.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
                && name.as_bytes().get(prefix.len()) == Some(&b'_')
        })
    }

    /// Converts `CAMUNDA_API_LONGPOLLING_TIMEOUT` into
    /// `camunda.api.longpolling.timeout`.
    fn env_var_to_key(name: &str) -> Option<PropertyKey> {
        let dotted = name.to_lowercase().replace('_', ".");
        PropertyKey::new(dotted).ok()
    }
}
