//! Catalogue loading from YAML text, files and the bundled default.

use std::fs;
use std::path::Path;

use crate::catalogue::schema::Catalogue;
use crate::error::{Error, Result};

/// The default catalogue compiled into the library.
pub const BUNDLED_CATALOGUE: &str = include_str!("legacy-mappings.yaml");

/// Loads catalogue documents.
///
/// Loading only parses; validation happens when a
/// [`MappingRegistry`](crate::catalogue::MappingRegistry) is built.
pub struct CatalogueLoader;

impl CatalogueLoader {
    /// Parse a catalogue from YAML text. Empty text is an empty catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalogue`] if the YAML is malformed or does not
    /// match the catalogue schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicfg::catalogue::CatalogueLoader;
    ///
    /// let catalogue = CatalogueLoader::load_str("mappings: []").unwrap();
    /// assert!(catalogue.mappings.is_empty());
    /// assert!(CatalogueLoader::load_str("mappings: 7").is_err());
    /// ```
    pub fn load_str(text: &str) -> Result<Catalogue> {
        if text.trim().is_empty() {
            return Ok(Catalogue::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load and parse a YAML catalogue file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Catalogue> {
        let contents = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Loading catalogue from {}", path.display());
        Self::load_str(&contents)
    }

    /// Parse the bundled default catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalogue`] if the bundled document is malformed.
    pub fn bundled() -> Result<Catalogue> {
        Self::load_str(BUNDLED_CATALOGUE)
    }
}
