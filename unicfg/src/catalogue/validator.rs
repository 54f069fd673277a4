//! Catalogue validation.
//!
//! Checks the invariants every catalogue must satisfy before a registry is
//! built from it. A catalogue that fails validation aborts startup.

use std::collections::HashSet;

use crate::catalogue::schema::{Catalogue, LegacyMapping};
use crate::error::{Error, Result};
use crate::key::PropertyKey;

/// Validates catalogues.
///
/// # Examples
///
/// ```
/// use unicfg::catalogue::{Catalogue, CatalogueValidator};
///
/// let catalogue = Catalogue::default();
/// CatalogueValidator::validate(&catalogue).unwrap();
/// ```
pub struct CatalogueValidator;

impl CatalogueValidator {
    /// Validate a complete catalogue.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateUnifiedKey`] if two mappings share a unified key
    ///   (compared by canonical form)
    /// - [`Error::UndisambiguatedAliasGroup`] if a group with several
    ///   aliases has an alias without profiles
    /// - [`Error::Validation`] for an empty alias group or a legacy key that
    ///   equals its unified key
    pub fn validate(catalogue: &Catalogue) -> Result<()> {
        let mut seen: HashSet<&PropertyKey> = HashSet::new();

        for mapping in &catalogue.mappings {
            if !seen.insert(&mapping.unified) {
                return Err(Error::DuplicateUnifiedKey {
                    unified_key: mapping.unified.to_string(),
                });
            }
            Self::validate_mapping(mapping)?;
        }

        Ok(())
    }

    fn validate_mapping(mapping: &LegacyMapping) -> Result<()> {
        for group in &mapping.legacy {
            if group.aliases.is_empty() {
                return Err(Error::Validation {
                    field: mapping.unified.to_string(),
                    message: "alias group must contain at least one legacy key".into(),
                });
            }

            if group.aliases.len() > 1
                && group.aliases.iter().any(|alias| alias.profiles.is_empty())
            {
                return Err(Error::UndisambiguatedAliasGroup {
                    unified_key: mapping.unified.to_string(),
                    group: group.keys(),
                });
            }
        }

        if let Some(alias) = mapping.legacy_keys().find(|key| **key == mapping.unified) {
            return Err(Error::Validation {
                field: mapping.unified.to_string(),
                message: format!("legacy key '{alias}' is the unified key itself"),
            });
        }

        Ok(())
    }
}
