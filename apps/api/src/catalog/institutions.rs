//! Institution list loader. The source is a JSON array of institution records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::catalog::CatalogError;
use crate::models::institution::InstitutionRecord;

pub fn load_institutions(path: &Path) -> Result<Vec<InstitutionRecord>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let institutions = read_institutions(BufReader::new(file))?;
    let active = institutions.iter().filter(|i| i.is_active).count();
    info!(
        "Loaded {} institutions ({} active) from {}",
        institutions.len(),
        active,
        path.display()
    );
    Ok(institutions)
}

pub fn read_institutions<R: Read>(reader: R) -> Result<Vec<InstitutionRecord>, CatalogError> {
    Ok(serde_json::from_reader(reader)?)
}
