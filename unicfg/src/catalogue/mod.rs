//! Legacy mapping catalogue and registry.
//!
//! The catalogue is a declarative YAML document mapping each unified
//! property to the legacy properties it replaces (see [`schema`]). A
//! [`MappingRegistry`] is built from a validated catalogue once at startup
//! and answers which legacy keys are eligible for a unified key under the
//! active profiles.
//!
//! # Examples
//!
//! ```
//! use unicfg::catalogue::MappingRegistry;
//! use unicfg::{Profiles, PropertyKey};
//!
//! let registry = MappingRegistry::from_yaml_str(
//!     r"
//! mappings:
//!   - unified: camunda.api.long-polling.timeout
//!     legacy:
//!       - - key: zeebe.gateway.longPolling.timeout
//!           profiles: [gateway]
//!         - key: zeebe.broker.gateway.longPolling.timeout
//!           profiles: [broker]
//! ",
//! )
//! .unwrap();
//!
//! let unified = PropertyKey::new("camunda.api.long-polling.timeout").unwrap();
//! let keys = registry.eligible_legacy_keys(&unified, &Profiles::parse("broker"));
//! assert_eq!(keys.len(), 1);
//! assert_eq!(keys[0].as_str(), "zeebe.broker.gateway.longPolling.timeout");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{CatalogueLoader, BUNDLED_CATALOGUE};
pub use schema::{AliasGroup, Catalogue, LegacyAlias, LegacyMapping};
pub use validator::CatalogueValidator;

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::key::{Profiles, PropertyKey};

/// Validated, immutable view of a catalogue.
///
/// The registry is `Send + Sync` and can be shared between threads without
/// locking.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    mappings: Vec<LegacyMapping>,
    index: HashMap<PropertyKey, usize>,
}

impl MappingRegistry {
    /// Builds a registry from a catalogue after validating it.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure reported by
    /// [`CatalogueValidator::validate`].
    pub fn new(catalogue: Catalogue) -> Result<Self> {
        CatalogueValidator::validate(&catalogue)?;

        let index = catalogue
            .mappings
            .iter()
            .enumerate()
            .map(|(position, mapping)| (mapping.unified.clone(), position))
            .collect();

        log::debug!("Built mapping registry with {} entries", catalogue.mappings.len());
        Ok(Self {
            mappings: catalogue.mappings,
            index,
        })
    }

    /// Creates a registry without any mappings.
    ///
    /// Every property resolves as a plain unified property.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses, validates and builds a registry from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::new(CatalogueLoader::load_str(text)?)
    }

    /// Parses, validates and builds a registry from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse or fails
    /// validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(CatalogueLoader::load_file(path)?)
    }

    /// Builds a registry from the bundled default catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalogue is invalid.
    pub fn bundled() -> Result<Self> {
        Self::new(CatalogueLoader::bundled()?)
    }

    /// Returns the legacy keys of `unified` that apply under `profiles`.
    ///
    /// An alias applies when it is unrestricted or when one of its profiles
    /// is active. Keys are returned in catalogue order. Unknown unified
    /// keys have no legacy keys.
    #[must_use]
    pub fn eligible_legacy_keys(
        &self,
        unified: &PropertyKey,
        profiles: &Profiles,
    ) -> Vec<PropertyKey> {
        self.get(unified)
            .map(|mapping| {
                mapping
                    .legacy
                    .iter()
                    .flat_map(|group| &group.aliases)
                    .filter(|alias| alias.applies_to(profiles))
                    .map(|alias| alias.key.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Looks up the mapping of a unified key.
    #[must_use]
    pub fn get(&self, unified: &PropertyKey) -> Option<&LegacyMapping> {
        self.index
            .get(unified)
            .and_then(|&position| self.mappings.get(position))
    }

    /// Returns the mapping whose legacy keys include `legacy`, if any.
    #[must_use]
    pub fn replacement_for(&self, legacy: &PropertyKey) -> Option<&LegacyMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.legacy_keys().any(|key| key == legacy))
    }

    /// Iterates over the mappings in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &LegacyMapping> {
        self.mappings.iter()
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns `true` if the registry has no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
