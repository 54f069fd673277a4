//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use std::fmt;
use unicfg::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// Semantic failure (e.g., conflicting configuration found) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (the checked configuration is wrong)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error (the catalogue is wrong)
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::LegacyNotSupported { .. }
                | LibError::AmbiguousLegacyConfiguration { .. }
                | LibError::AmbiguousConfiguration { .. }
                | LibError::TypeCoercion { .. }
                | LibError::MissingValue { .. }
                | LibError::MutuallyExclusive { .. } => 1,
                LibError::InvalidKey { .. } | LibError::InvalidFlagCombination { .. } => 4,
                LibError::FileRead { .. } | LibError::Io(_) => 5,
                LibError::DuplicateUnifiedKey { .. }
                | LibError::UndisambiguatedAliasGroup { .. }
                | LibError::Catalogue(_) => 7,
                _ => 6,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_conflicts_are_semantic_failures() {
        let err = CliError::from(LibError::AmbiguousConfiguration {
            unified_key: "camunda.api.long-polling.enabled".into(),
            unified_value: "true".into(),
            legacy: vec![("zeebe.gateway.longPolling.enabled".into(), "false".into())],
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_catalogue_violations_are_configuration_errors() {
        let err = CliError::from(LibError::DuplicateUnifiedKey {
            unified_key: "camunda.cluster.node-id".into(),
        });
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_argument_and_io_codes() {
        let key = CliError::from(LibError::InvalidKey {
            key: "a..b".into(),
            reason: "empty segment".into(),
        });
        assert_eq!(key.exit_code(), 4);
        assert_eq!(CliError::InvalidArguments("x".into()).exit_code(), 4);

        let io = CliError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_code(), 5);
        assert!(io.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_other_library_errors() {
        let err = CliError::from(LibError::Validation {
            field: "line 3".into(),
            message: "expected 'key=value'".into(),
        });
        assert_eq!(err.exit_code(), 6);
    }
}
