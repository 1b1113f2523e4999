//! Catalog — the career dataset and institution list, loaded once at startup
//! and shared read-only across requests.

pub mod dataset;
pub mod institutions;

use thiserror::Error;
use tracing::warn;

use crate::config::Config;
use crate::models::career::CareerDatasetEntry;
use crate::models::institution::InstitutionRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Immutable reference data for the matching engine.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub dataset: Vec<CareerDatasetEntry>,
    pub institutions: Vec<InstitutionRecord>,
}

/// Loads both sources named in the config.
pub fn load_catalog(config: &Config) -> Result<Catalog, CatalogError> {
    let dataset = dataset::load_dataset(&config.career_dataset_path)?;
    if dataset.is_empty() {
        warn!("Career dataset is empty; every submission will get an empty ranking");
    }
    let institutions = institutions::load_institutions(&config.institutions_path)?;

    Ok(Catalog {
        dataset,
        institutions,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const SAMPLE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

    #[test]
    fn test_bundled_sample_catalog_loads() {
        let dir = Path::new(SAMPLE_DIR);
        let dataset = dataset::load_dataset(&dir.join("careers.csv")).unwrap();
        let institutions = institutions::load_institutions(&dir.join("institutions.json")).unwrap();

        assert_eq!(dataset[0].career_id, "software_engineer");
        assert!(dataset.iter().all(|entry| !entry.thresholds.is_empty()));
        assert!(institutions.iter().any(|i| !i.is_active));
    }
}
