#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Extraction record and clinical status types for biomarker reports.
//!
//! Every processed PDF produces exactly one [`ExtractionResult`]. A run
//! collects them into a [`ResultSet`] which is written out as a JSON array
//! and later read back by the summary report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Biomarker values extracted from a single PDF report.
///
/// Created once per input file and never mutated afterwards. Serializes as
/// `{"file": ..., "date": ..., "biomarkers": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Base file name of the report (e.g. `"2024-03-labs.pdf"`).
    pub file: String,
    /// Report date. Date extraction is not implemented, so this is always
    /// `None` for freshly extracted records and serializes as `null`.
    pub date: Option<String>,
    /// Biomarker name to numeric value, in the order the patterns were
    /// searched. A key is present only when its pattern matched and the
    /// captured text parsed as a number.
    pub biomarkers: IndexMap<String, f64>,
}

impl ExtractionResult {
    /// Creates a record for `file` with no date.
    #[must_use]
    pub const fn new(file: String, biomarkers: IndexMap<String, f64>) -> Self {
        Self {
            file,
            date: None,
            biomarkers,
        }
    }

    /// Returns the value recorded for `name`, if any.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.biomarkers.get(name).copied()
    }
}

/// All records of one run, in the order the input files were processed.
pub type ResultSet = Vec<ExtractionResult>;

/// Where a biomarker value falls relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum BiomarkerStatus {
    /// Below the lower bound of the reference range.
    Low,
    /// Inside the reference range, or no range is known.
    Normal,
    /// Above the upper bound of the reference range.
    High,
}

/// Inclusive clinical reference range for a biomarker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    /// Lowest value considered normal.
    pub low: f64,
    /// Highest value considered normal.
    pub high: f64,
}

impl ReferenceRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Classifies `value` against this range. Both bounds count as normal.
    #[must_use]
    pub fn classify(&self, value: f64) -> BiomarkerStatus {
        if value < self.low {
            BiomarkerStatus::Low
        } else if value > self.high {
            BiomarkerStatus::High
        } else {
            BiomarkerStatus::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_absent_date_as_null() {
        let mut biomarkers = IndexMap::new();
        biomarkers.insert("LDL".to_owned(), 110.5);
        let record = ExtractionResult::new("report.pdf".to_owned(), biomarkers);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["file"], "report.pdf");
        assert!(json["date"].is_null());
        assert_eq!(json["biomarkers"]["LDL"], 110.5);
    }

    #[test]
    fn biomarker_keys_keep_insertion_order() {
        let mut biomarkers = IndexMap::new();
        biomarkers.insert("Total Cholesterol".to_owned(), 190.0);
        biomarkers.insert("LDL".to_owned(), 100.0);
        biomarkers.insert("Creatinine".to_owned(), 1.0);
        let record = ExtractionResult::new("a.pdf".to_owned(), biomarkers);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"file":"a.pdf","date":null,"biomarkers":{"Total Cholesterol":190.0,"LDL":100.0,"Creatinine":1.0}}"#
        );

        let read: ExtractionResult = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = read.biomarkers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Total Cholesterol", "LDL", "Creatinine"]);
    }

    #[test]
    fn deserializes_record_with_date() {
        let json = r#"{"file":"a.pdf","date":"2024-01-15","biomarkers":{"HDL":52.0}}"#;
        let record: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(record.date.as_deref(), Some("2024-01-15"));
        assert_eq!(record.value("HDL"), Some(52.0));
        assert_eq!(record.value("LDL"), None);
    }

    #[test]
    fn classifies_against_inclusive_bounds() {
        let range = ReferenceRange::new(4.0, 5.6);
        assert_eq!(range.classify(3.9), BiomarkerStatus::Low);
        assert_eq!(range.classify(4.0), BiomarkerStatus::Normal);
        assert_eq!(range.classify(5.6), BiomarkerStatus::Normal);
        assert_eq!(range.classify(5.7), BiomarkerStatus::High);
    }

    #[test]
    fn status_displays_variant_name() {
        assert_eq!(BiomarkerStatus::High.to_string(), "High");
        assert_eq!("Low".parse::<BiomarkerStatus>().unwrap(), BiomarkerStatus::Low);
    }
}
