//! Career dataset loader.
//!
//! The dataset is a CSV with one row per career: `career_id`, `career_title`, and any
//! number of `<axis>_threshold` / `<axis>_weight` columns. Rows may be ragged. Unknown
//! columns, empty cells and unparseable numbers all mean "not evaluated".

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::catalog::CatalogError;
use crate::models::career::CareerDatasetEntry;
use crate::models::quiz::Axis;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Id,
    Title,
    Threshold(Axis),
    Weight(Axis),
    Ignored,
}

fn classify_header(header: &str) -> Column {
    let header = header.trim().to_ascii_lowercase();
    match header.as_str() {
        "career_id" => Column::Id,
        "career_title" => Column::Title,
        _ => {
            if let Some(axis) = header.strip_suffix("_threshold").and_then(Axis::from_name) {
                Column::Threshold(axis)
            } else if let Some(axis) = header.strip_suffix("_weight").and_then(Axis::from_name) {
                Column::Weight(axis)
            } else {
                Column::Ignored
            }
        }
    }
}

/// Loads the dataset from a CSV file on disk.
pub fn load_dataset(path: &Path) -> Result<Vec<CareerDatasetEntry>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_dataset(file)?;
    info!(
        "Loaded {} careers from {} (ranking ties follow file order)",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parses dataset rows from any CSV source, preserving row order.
pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<CareerDatasetEntry>, CatalogError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns: Vec<Column> = rdr.headers()?.iter().map(classify_header).collect();
    if !columns.contains(&Column::Title) {
        return Err(CatalogError::MissingColumn("career_title"));
    }

    let mut dataset = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let row_number = index + 1;
        match parse_row(&columns, &record, row_number) {
            Some(entry) => dataset.push(entry),
            None => warn!("Skipping dataset row {row_number}: no career_title"),
        }
    }

    Ok(dataset)
}

fn parse_row(columns: &[Column], record: &StringRecord, row_number: usize) -> Option<CareerDatasetEntry> {
    let mut career_id = None;
    let mut career_title = None;
    let mut thresholds = BTreeMap::new();
    let mut weights = BTreeMap::new();

    // zip stops at the shorter side, so short rows simply miss trailing columns
    for (column, cell) in columns.iter().zip(record.iter()) {
        if cell.is_empty() {
            continue;
        }
        match *column {
            Column::Id => career_id = Some(cell.to_string()),
            Column::Title => career_title = Some(cell.to_string()),
            Column::Threshold(axis) => {
                if let Some(value) = parse_number(cell, row_number) {
                    thresholds.insert(axis, value);
                }
            }
            Column::Weight(axis) => {
                if let Some(value) = parse_number(cell, row_number) {
                    weights.insert(axis, value);
                }
            }
            Column::Ignored => {}
        }
    }

    Some(CareerDatasetEntry {
        career_id: career_id.unwrap_or_else(|| format!("career-{row_number}")),
        career_title: career_title?,
        thresholds,
        weights,
    })
}

fn parse_number(cell: &str, row_number: usize) -> Option<f64> {
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!("Dataset row {row_number}: ignoring non-numeric value '{cell}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DATASET_CSV: &str = "\
career_id,career_title,analytical_threshold,analytical_weight,creative_threshold,notes
swe,Software Engineer,5,2,,core
designer,Graphic Designer,,,6
,Data Analyst,4
";

    #[test]
    fn test_reads_sparse_rows() {
        let dataset = read_dataset(DATASET_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let swe = &dataset[0];
        assert_eq!(swe.career_id, "swe");
        assert_eq!(swe.thresholds.get(&Axis::Analytical), Some(&5.0));
        assert_eq!(swe.weights.get(&Axis::Analytical), Some(&2.0));
        assert!(!swe.thresholds.contains_key(&Axis::Creative));

        let designer = &dataset[1];
        assert_eq!(designer.thresholds.len(), 1);
        assert_eq!(designer.thresholds.get(&Axis::Creative), Some(&6.0));
        assert!(designer.weights.is_empty());
    }

    #[test]
    fn test_missing_id_gets_row_number() {
        let dataset = read_dataset(DATASET_CSV.as_bytes()).unwrap();
        assert_eq!(dataset[2].career_id, "career-3");
        assert_eq!(dataset[2].career_title, "Data Analyst");
    }

    #[test]
    fn test_bad_numbers_mean_not_evaluated() {
        let csv = "career_title,social_threshold,social_weight,skills_threshold\nTeacher,high,NaN,3\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert!(!dataset[0].thresholds.contains_key(&Axis::Social));
        assert!(dataset[0].weights.is_empty());
        assert_eq!(dataset[0].thresholds.get(&Axis::Skills), Some(&3.0));
    }

    #[test]
    fn test_rows_without_title_are_skipped() {
        let csv = "career_id,career_title\na,Nurse\nb,\nc,Pilot\n";
        let ids: Vec<String> = read_dataset(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(|e| e.career_id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let csv = "Career_Title,Structured_Threshold\nAccountant,4\n";
        let dataset = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(dataset[0].thresholds.get(&Axis::Structured), Some(&4.0));
    }

    #[test]
    fn test_missing_title_column_is_an_error() {
        let err = read_dataset("career_id,analytical_threshold\nx,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("career_title")));
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        assert!(read_dataset("career_id,career_title\n".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET_CSV.as_bytes()).unwrap();
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/careers.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
