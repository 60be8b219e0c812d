//! JSON serialization of a [`ResultSet`].
//!
//! Biomarker keys serialize in the order they were extracted.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use biomarker_extract_models::{ExtractionResult, ResultSet};

use crate::ExtractError;

/// Writes `results` to `path` as a JSON array with 2-space indentation,
/// replacing any existing file.
///
/// The parent directory must already exist. The write is not atomic; an
/// interrupted run can leave a truncated file behind.
///
/// # Errors
///
/// * [`ExtractError::Results`] if the file cannot be created or written
/// * [`ExtractError::Json`] if serialization fails
pub fn write_results(path: &Path, results: &[ExtractionResult]) -> Result<(), ExtractError> {
    let io_err = |source| ExtractError::Results {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush().map_err(io_err)?;

    log::debug!("Wrote {} record(s) to {}", results.len(), path.display());

    Ok(())
}

/// Reads a results file previously written by [`write_results`].
///
/// # Errors
///
/// * [`ExtractError::Results`] if the file cannot be opened
/// * [`ExtractError::Json`] if the contents are not a valid result set
pub fn read_results(path: &Path) -> Result<ResultSet, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Results {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn record(file: &str, values: &[(&str, f64)]) -> ExtractionResult {
        let biomarkers: IndexMap<String, f64> = values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), *value))
            .collect();
        ExtractionResult::new(file.to_owned(), biomarkers)
    }

    #[test]
    fn round_trips_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biomarker_data.json");
        let results = vec![
            record("b.pdf", &[("Creatinine", 1.2), ("LDL", 110.5)]),
            record("a.pdf", &[]),
            record("c.pdf", &[("HbA1c", 5.4)]),
        ];

        write_results(&path, &results).unwrap();
        let read = read_results(&path).unwrap();

        assert_eq!(read, results);
        let keys: Vec<&str> = read[0].biomarkers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Creatinine", "LDL"]);
    }

    #[test]
    fn writes_two_space_indented_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_results(&path, &[record("a.pdf", &[("Creatinine", 1.2)])]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[\n  {\n    \"file\": \"a.pdf\",\n    \"date\": null,\n    \"biomarkers\": {\n      \"Creatinine\": 1.2\n    }\n  }\n]"
        );
    }

    #[test]
    fn empty_result_set_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_results(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale contents that are longer than the new ones").unwrap();

        write_results(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted").join("out.json");

        let err = write_results(&path, &[]).unwrap_err();
        assert!(matches!(err, ExtractError::Results { .. }));
    }
}
