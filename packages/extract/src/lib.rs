#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regex-driven biomarker extraction from lab report text.
//!
//! The pipeline is deliberately small:
//!
//! 1. [`walker`] lists the PDFs in a directory and reads each one through a
//!    [`biomarker_extract_pdf::PdfTextReader`].
//! 2. [`extractor`] runs every [`patterns::BiomarkerPattern`] against the
//!    joined text and keeps the first numeric match per biomarker.
//! 3. [`output`] writes the collected records as a pretty-printed JSON
//!    array.
//!
//! [`report`] reads those records back and produces the min/max/mean and
//! reference-range interpretation shown by the `summarize` command.

pub mod extractor;
pub mod output;
pub mod patterns;
pub mod progress;
pub mod report;
pub mod walker;

use biomarker_extract_pdf::PdfError;

/// Default directory scanned for PDF reports.
pub const DEFAULT_INPUT_DIR: &str = "data";

/// Default location of the extracted JSON results.
pub const DEFAULT_OUTPUT_PATH: &str = "extracted/biomarker_data.json";

/// Errors that abort an extraction run.
///
/// Per-biomarker parse failures are not represented here: they are logged
/// and the biomarker is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The input directory could not be listed.
    #[error("failed to list directory {path}: {source}")]
    ListDir {
        /// Directory that was being listed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A PDF could not be opened or its text could not be extracted.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// The results file could not be written or read.
    #[error("failed to access results file {path}: {source}")]
    Results {
        /// Path of the results file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A biomarker regex failed to compile.
    #[error("invalid pattern for {name}: {source}")]
    Pattern {
        /// Biomarker the pattern belongs to.
        name: String,
        /// Compilation error from the regex engine.
        #[source]
        source: regex::Error,
    },

    /// A biomarker pattern's value group does not exist.
    #[error(
        "invalid value group {group} for {name}: pattern has {groups} capture group(s)"
    )]
    ValueGroup {
        /// Biomarker the pattern belongs to.
        name: String,
        /// Requested capture group index.
        group: usize,
        /// Number of capture groups in the pattern (excluding group 0).
        groups: usize,
    },

    /// A pattern file could not be read.
    #[error("failed to read pattern file {path}: {source}")]
    PatternFile {
        /// Path of the pattern file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A pattern file is not valid TOML or does not match the schema.
    #[error("invalid pattern file: {0}")]
    Config(#[from] toml::de::Error),
}
