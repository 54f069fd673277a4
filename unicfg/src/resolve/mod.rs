//! Property resolution across unified and legacy keys.
//!
//! A [`Resolver`] decides the effective value of a unified property from
//! three inputs: the value supplied under the unified key, the values of
//! the eligible legacy keys, and a default. Every value is coerced into the
//! requested [`TargetType`] first, so `10s` under one key and `PT10S` under
//! another agree.
//!
//! The decision, given the distinct coerced legacy values `L`:
//!
//! | Condition | Outcome |
//! |---|---|
//! | `NotSupported` and any legacy key set | [`Error::LegacyNotSupported`] |
//! | `L` empty | the supplied value, else the default |
//! | more than one value in `L` | [`Error::AmbiguousLegacyConfiguration`] |
//! | one value, nothing supplied | the legacy value |
//! | one value, equal to the supplied value | the supplied value |
//! | one value, different from the supplied value | [`Error::AmbiguousConfiguration`] |
//!
//! A request with `require_match` in `NotSupported` mode is rejected with
//! [`Error::InvalidFlagCombination`] before anything is read.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use unicfg::catalogue::MappingRegistry;
//! use unicfg::resolve::Resolver;
//! use unicfg::source::MapSource;
//! use unicfg::Profiles;
//!
//! let registry = MappingRegistry::from_yaml_str(
//!     r"
//! mappings:
//!   - unified: camunda.api.long-polling.timeout
//!     legacy:
//!       - key: zeebe.broker.gateway.longPolling.timeout
//!         profiles: [broker]
//! ",
//! )
//! .unwrap();
//! let source = MapSource::from_pairs([("zeebe.broker.gateway.longPolling.timeout", "PT20S")]).unwrap();
//!
//! let resolver = Resolver::new(source, registry).with_profiles(Profiles::parse("broker"));
//! let timeout: Duration = resolver
//!     .property("camunda.api.long-polling.timeout")
//!     .unwrap()
//!     .resolve_as()
//!     .unwrap();
//! assert_eq!(timeout, Duration::from_secs(20));
//! ```

pub mod request;
pub mod sink;

#[cfg(test)]
mod proptests;

pub use request::PropertyRequest;
pub use sink::{deprecation_message, DeprecationSink, LogSink};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalogue::MappingRegistry;
use crate::coerce::{coerce, TargetType, Value};
use crate::error::{Error, Result};
use crate::key::{Profiles, PropertyKey};
use crate::source::PropertySource;

/// Whether legacy keys may still supply a unified property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum CompatibilityMode {
    /// Legacy keys are honored, with a deprecation warning.
    #[default]
    Supported,
    /// Setting any legacy key is an error.
    NotSupported,
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supported => write!(f, "supported"),
            Self::NotSupported => write!(f, "not-supported"),
        }
    }
}

/// A single resolution of one unified property.
///
/// Requests are built per property access and never cached.
///
/// # Examples
///
/// ```
/// use unicfg::coerce::{TargetType, Value};
/// use unicfg::resolve::{CompatibilityMode, ResolutionRequest};
/// use unicfg::PropertyKey;
///
/// let request = ResolutionRequest::new(
///     PropertyKey::new("camunda.cluster.node-id").unwrap(),
///     TargetType::Integer,
/// )
/// .with_default(Value::Integer(0))
/// .with_mode(CompatibilityMode::NotSupported)
/// .with_candidates(vec![PropertyKey::new("zeebe.broker.cluster.nodeId").unwrap()]);
///
/// assert!(request.supplied_value.is_none());
/// assert!(!request.require_match);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// The unified key being resolved.
    pub unified_key: PropertyKey,
    /// The coerced value of the unified key, if it is explicitly set.
    pub supplied_value: Option<Value>,
    /// The value used when nothing is configured.
    pub default_value: Option<Value>,
    /// The type every candidate is coerced into.
    pub target: TargetType,
    /// Whether legacy keys are honored.
    pub mode: CompatibilityMode,
    /// Whether unified and legacy values must match.
    pub require_match: bool,
    /// The legacy keys eligible under the active profiles.
    pub candidate_legacy_keys: Vec<PropertyKey>,
}

impl ResolutionRequest {
    /// Creates a request with no supplied value, no default, no legacy
    /// candidates and [`CompatibilityMode::Supported`].
    #[must_use]
    pub fn new(unified_key: PropertyKey, target: TargetType) -> Self {
        Self {
            unified_key,
            supplied_value: None,
            default_value: None,
            target,
            mode: CompatibilityMode::default(),
            require_match: false,
            candidate_legacy_keys: Vec::new(),
        }
    }

    /// Sets the value supplied under the unified key.
    #[must_use]
    pub fn with_supplied(mut self, value: Value) -> Self {
        self.supplied_value = Some(value);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets the compatibility mode.
    #[must_use]
    pub fn with_mode(mut self, mode: CompatibilityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether unified and legacy values must match.
    #[must_use]
    pub fn with_require_match(mut self, require_match: bool) -> Self {
        self.require_match = require_match;
        self
    }

    /// Sets the legacy candidate keys.
    #[must_use]
    pub fn with_candidates(mut self, keys: Vec<PropertyKey>) -> Self {
        self.candidate_legacy_keys = keys;
        self
    }
}

/// A legacy key that is set, with its raw and coerced value.
struct LegacyEntry<'a> {
    key: &'a PropertyKey,
    raw: String,
    value: Value,
}

/// Resolves unified properties against a property source.
///
/// The resolver is immutable and `Send + Sync` whenever its source is, so
/// one instance can serve concurrent resolutions.
pub struct Resolver<S> {
    source: S,
    registry: Arc<MappingRegistry>,
    profiles: Profiles,
    sink: Arc<dyn DeprecationSink + Send + Sync>,
}

impl<S: PropertySource> Resolver<S> {
    /// Creates a resolver with no active profiles that reports deprecations
    /// through [`LogSink`].
    #[must_use]
    pub fn new(source: S, registry: impl Into<Arc<MappingRegistry>>) -> Self {
        Self {
            source,
            registry: registry.into(),
            profiles: Profiles::new(),
            sink: Arc::new(LogSink),
        }
    }

    /// Sets the active profiles.
    #[must_use]
    pub fn with_profiles(mut self, profiles: Profiles) -> Self {
        self.profiles = profiles;
        self
    }

    /// Sets the deprecation sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DeprecationSink + Send + Sync + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Returns the property source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the mapping registry.
    #[must_use]
    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Returns the active profiles.
    #[must_use]
    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    /// Starts a resolution of the unified property `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is malformed.
    pub fn property(&self, key: &str) -> Result<PropertyRequest<'_, S>> {
        Ok(PropertyRequest::new(self, PropertyKey::new(key)?))
    }

    /// Resolves a request, falling back to its default.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Resolver::try_resolve`], and
    /// [`Error::MissingValue`] if nothing is configured and the request has
    /// no default.
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Value> {
        self.try_resolve(request)?
            .ok_or_else(|| Error::MissingValue {
                key: request.unified_key.to_string(),
            })
    }

    /// Resolves a request, returning `None` if nothing is configured and the
    /// request has no default.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFlagCombination`] for `require_match` in
    ///   `NotSupported` mode
    /// - [`Error::LegacyNotSupported`] if a legacy key is set in
    ///   `NotSupported` mode
    /// - [`Error::TypeCoercion`] if a legacy value cannot be coerced
    /// - [`Error::Validation`] if the source reports a legacy key as set
    ///   but returns no value for it
    /// - [`Error::AmbiguousLegacyConfiguration`] if legacy values disagree
    /// - [`Error::AmbiguousConfiguration`] if the legacy value disagrees
    ///   with the supplied value
    pub fn try_resolve(&self, request: &ResolutionRequest) -> Result<Option<Value>> {
        let unified_key = &request.unified_key;

        if request.mode == CompatibilityMode::NotSupported && request.require_match {
            return Err(Error::InvalidFlagCombination {
                unified_key: unified_key.to_string(),
            });
        }

        let set_keys: Vec<&PropertyKey> = request
            .candidate_legacy_keys
            .iter()
            .filter(|key| self.source.is_explicitly_set(key))
            .collect();

        if request.mode == CompatibilityMode::NotSupported && !set_keys.is_empty() {
            return Err(Error::LegacyNotSupported {
                legacy_keys: set_keys.iter().map(ToString::to_string).collect(),
                unified_key: unified_key.to_string(),
            });
        }

        let legacy = self.coerce_legacy(&set_keys, &request.target)?;

        let mut distinct: Vec<&Value> = legacy.iter().map(|entry| &entry.value).collect();
        distinct.sort();
        distinct.dedup();

        let value = match (distinct.as_slice(), &request.supplied_value) {
            ([], supplied) => {
                let value = supplied.clone().or_else(|| request.default_value.clone());
                log::debug!(
                    "Resolved '{unified_key}' without legacy keys (explicit: {})",
                    supplied.is_some()
                );
                return Ok(value);
            }
            ([_, _, ..], _) => {
                return Err(Error::AmbiguousLegacyConfiguration {
                    unified_key: unified_key.to_string(),
                    entries: entries(&legacy),
                });
            }
            ([value], None) => (*value).clone(),
            ([value], Some(supplied)) if *value == supplied => supplied.clone(),
            ([_], Some(supplied)) => {
                return Err(Error::AmbiguousConfiguration {
                    unified_key: unified_key.to_string(),
                    unified_value: supplied.to_string(),
                    legacy: entries(&legacy),
                });
            }
        };

        let used: Vec<PropertyKey> = legacy.iter().map(|entry| entry.key.clone()).collect();
        log::debug!(
            "Resolved '{unified_key}' from {} legacy key(s) (explicit: {})",
            used.len(),
            request.supplied_value.is_some()
        );
        self.sink.legacy_used(unified_key, &used);

        Ok(Some(value))
    }

    fn coerce_legacy<'a>(
        &self,
        keys: &[&'a PropertyKey],
        target: &TargetType,
    ) -> Result<Vec<LegacyEntry<'a>>> {
        keys.iter()
            .map(|&key| {
                let raw = self.source.raw_value(key).ok_or_else(|| Error::Validation {
                    field: key.to_string(),
                    message: "key is reported as set but has no value".to_string(),
                })?;
                let value = coerce(key, &raw, target)?;
                Ok(LegacyEntry {
                    key,
                    raw: raw.to_string(),
                    value,
                })
            })
            .collect()
    }
}

fn entries(legacy: &[LegacyEntry<'_>]) -> Vec<(String, String)> {
    legacy
        .iter()
        .map(|entry| (entry.key.to_string(), entry.raw.clone()))
        .collect()
}

impl<S> fmt::Debug for Resolver<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry.len())
            .field("profiles", &self.profiles)
            .finish_non_exhaustive()
    }
}
