//! Command to validate a legacy catalogue.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use unicfg::catalogue::{Catalogue, CatalogueLoader, CatalogueValidator};

/// Validate a legacy catalogue.
#[derive(Args)]
pub struct ValidateCommand {
    /// Catalogue to validate (defaults to `--catalogue`, then the bundled one)
    #[arg(value_name = "CATALOGUE")]
    pub catalogue: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    catalogue: String,
    unified_properties: usize,
    legacy_keys: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = self.catalogue.or_else(|| global.catalogue.clone());

        // 1. Check file exists
        if let Some(path) = &path {
            if !path.exists() {
                return Err(CliError::InvalidArguments(format!(
                    "File not found: {}",
                    path.display()
                )));
            }
        }
        let name = path
            .as_ref()
            .map_or_else(|| "bundled".to_string(), |p| p.display().to_string());

        // 2. Parse the catalogue
        let loaded = match &path {
            Some(path) => CatalogueLoader::load_file(path),
            None => CatalogueLoader::bundled(),
        };

        // 3. Validate the invariants
        let result = loaded.and_then(|catalogue| {
            CatalogueValidator::validate(&catalogue)?;
            Ok(catalogue)
        });

        match result {
            Ok(catalogue) => {
                let (unified, legacy) = counts(&catalogue);
                if self.json {
                    print_json(&Summary {
                        catalogue: name,
                        unified_properties: unified,
                        legacy_keys: legacy,
                        valid: true,
                        error: None,
                    })?;
                } else {
                    println!(
                        "Catalogue is valid: {unified} unified properties, {legacy} legacy keys"
                    );
                }
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                if self.json {
                    print_json(&Summary {
                        catalogue: name,
                        unified_properties: 0,
                        legacy_keys: 0,
                        valid: false,
                        error: Some(&message),
                    })?;
                } else {
                    eprintln!("Validation error: {message}");
                }
                Err(CliError::SemanticFailure(
                    "Catalogue validation failed".to_string(),
                ))
            }
        }
    }
}

fn counts(catalogue: &Catalogue) -> (usize, usize) {
    let legacy = catalogue
        .mappings
        .iter()
        .map(|mapping| mapping.legacy_keys().count())
        .sum();
    (catalogue.mappings.len(), legacy)
}
