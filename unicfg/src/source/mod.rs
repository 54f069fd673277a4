//! Property sources supplying raw configuration values.
//!
//! The resolution engine never parses files itself: it asks a
//! [`PropertySource`] for the raw value of a key and whether that key was
//! explicitly supplied. This module defines the trait and ships the sources
//! an application typically composes:
//!
//! - [`MapSource`]: explicit key/value entries, built from pairs, properties
//!   text, YAML documents or environment variables
//! - [`LayeredSource`]: ordered composition of sources with precedence
//!
//! # Examples
//!
//! ```
//! use unicfg::source::{LayeredSource, MapSource, PropertySource, RawValue};
//! use unicfg::PropertyKey;
//!
//! let file = MapSource::from_properties_str("camunda.api.long-polling.timeout=20000\n").unwrap();
//! let env = MapSource::from_env_vars(
//!     &["CAMUNDA"],
//!     [("CAMUNDA_API_LONGPOLLING_TIMEOUT".to_string(), "30000".to_string())],
//! );
//!
//! let layered = LayeredSource::new().with(env).with(file);
//! let key = PropertyKey::new("camunda.api.longPolling.timeout").unwrap();
//! assert_eq!(layered.raw_value(&key), Some(RawValue::Text("30000".into())));
//! ```

pub mod environment;
pub mod layered;
pub mod map;

pub use layered::LayeredSource;
pub use map::MapSource;

use std::fmt;

use crate::key::PropertyKey;

/// A raw, not yet coerced property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single textual value (`key=value`).
    Text(String),
    /// Indexed entries (`key.0=a`, `key[1]=b`), ordered by index.
    Indexed(Vec<String>),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Indexed(entries) => write!(f, "[{}]", entries.join(", ")),
        }
    }
}

/// Supplies raw values by key.
///
/// Implementations must be deterministic: the same key always yields the
/// same answer for the lifetime of the source.
pub trait PropertySource {
    /// Returns the raw value explicitly supplied for `key`, if any.
    fn raw_value(&self, key: &PropertyKey) -> Option<RawValue>;

    /// Returns `true` if `key` was explicitly supplied (as opposed to only
    /// carrying its structural default).
    fn is_explicitly_set(&self, key: &PropertyKey) -> bool {
        self.raw_value(key).is_some()
    }
}

impl<S: PropertySource + ?Sized> PropertySource for &S {
    fn raw_value(&self, key: &PropertyKey) -> Option<RawValue> {
        (**self).raw_value(key)
    }

    fn is_explicitly_set(&self, key: &PropertyKey) -> bool {
        (**self).is_explicitly_set(key)
    }
}

impl<S: PropertySource + ?Sized> PropertySource for Box<S> {
    fn raw_value(&self, key: &PropertyKey) -> Option<RawValue> {
        (**self).raw_value(key)
    }

    fn is_explicitly_set(&self, key: &PropertyKey) -> bool {
        (**self).is_explicitly_set(key)
    }
}
