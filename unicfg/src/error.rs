//! Error types for the unicfg library.
//!
//! This module provides the error hierarchy for catalogue loading, type
//! coercion and property resolution, using `thiserror` for ergonomic error
//! handling. Every variant is terminal: configuration errors are reported to
//! the operator and never downgraded to a default.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a unicfg error.
///
/// # Examples
///
/// ```
/// use unicfg::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the unicfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// A legacy property is set although the unified property no longer
    /// honors legacy aliases.
    #[error(
        "legacy configuration is no longer supported: {} (use '{unified_key}' instead)",
        legacy_keys.join(", ")
    )]
    LegacyNotSupported {
        /// The legacy keys that are set.
        legacy_keys: Vec<String>,
        /// The unified key replacing them.
        unified_key: String,
    },

    /// Two or more legacy properties hold different values.
    #[error(
        "Ambiguous legacy configuration for '{unified_key}': {} have different values",
        format_entries(entries)
    )]
    AmbiguousLegacyConfiguration {
        /// The unified key the legacy properties map to.
        unified_key: String,
        /// The conflicting legacy keys with their raw values.
        entries: Vec<(String, String)>,
    },

    /// The unified property conflicts with the (unanimous) legacy value.
    #[error(
        "Ambiguous configuration: '{unified_key}={unified_value}' conflicts with {}",
        format_entries(legacy)
    )]
    AmbiguousConfiguration {
        /// The unified key.
        unified_key: String,
        /// The value of the unified key.
        unified_value: String,
        /// The legacy keys with their raw values.
        legacy: Vec<(String, String)>,
    },

    /// A resolution request that requires matching values while disallowing
    /// legacy properties.
    #[error(
        "invalid flag combination for '{unified_key}': values cannot be required to match \
         when legacy properties are not supported"
    )]
    InvalidFlagCombination {
        /// The unified key of the offending request.
        unified_key: String,
    },

    /// A raw value could not be converted into the requested type.
    #[error("cannot convert '{key}={raw}' to {expected}")]
    TypeCoercion {
        /// The key whose value failed to convert.
        key: String,
        /// The raw text that was rejected.
        raw: String,
        /// A description of the requested type.
        expected: String,
    },

    /// Nothing configures a property that has no default.
    #[error("no value configured for '{key}' and no default given")]
    MissingValue {
        /// The unified key.
        key: String,
    },

    /// More than one alternative field of the same concept is configured.
    #[error(
        "mutually exclusive configuration for {concept}: cannot configure both {}",
        quote_all(fields)
    )]
    MutuallyExclusive {
        /// The concept the fields configure.
        concept: String,
        /// The fields that are set at the same time.
        fields: Vec<String>,
    },

    /// Two catalogue entries declare the same unified key.
    #[error("duplicate unified key in legacy catalogue: '{unified_key}'")]
    DuplicateUnifiedKey {
        /// The duplicated unified key.
        unified_key: String,
    },

    /// An alias group with several legacy keys has an alias without profiles.
    #[error(
        "alias group [{}] of '{unified_key}' must declare profiles for each legacy key",
        group.join(", ")
    )]
    UndisambiguatedAliasGroup {
        /// The unified key owning the group.
        unified_key: String,
        /// The legacy keys of the group.
        group: Vec<String>,
    },

    /// A property key is malformed.
    #[error("invalid property key '{key}': {reason}")]
    InvalidKey {
        /// The malformed key.
        key: String,
        /// The reason the key is invalid.
        reason: String,
    },

    /// The legacy catalogue or a property document could not be parsed.
    #[error("catalogue error: {0}")]
    Catalogue(#[from] serde_yaml::Error),

    /// A configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

fn format_entries(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("'{key}={value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote_all(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| format!("'{field}'"))
        .collect::<Vec<_>>()
        .join(" and ")
}

impl Error {
    /// Check if the error reports conflicting values between sources.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::Error;
    ///
    /// let err = Error::AmbiguousLegacyConfiguration {
    ///     unified_key: "camunda.cluster.network.compression".into(),
    ///     entries: vec![("a".into(), "gzip".into()), ("b".into(), "snappy".into())],
    /// };
    /// assert!(err.is_ambiguous());
    /// ```
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousLegacyConfiguration { .. } | Self::AmbiguousConfiguration { .. }
        )
    }

    /// Check if the error is caused by the use of legacy properties.
    #[must_use]
    pub fn is_legacy_related(&self) -> bool {
        matches!(
            self,
            Self::LegacyNotSupported { .. }
                | Self::AmbiguousLegacyConfiguration { .. }
                | Self::AmbiguousConfiguration { .. }
        )
    }

    /// Check if the error is a catalogue invariant violation.
    #[must_use]
    pub fn is_registry_violation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUnifiedKey { .. } | Self::UndisambiguatedAliasGroup { .. }
        )
    }
}
