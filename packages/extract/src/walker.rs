//! Directory walking and the per-file batch loop.
//!
//! Files are processed strictly one after another. The first file that
//! cannot be read aborts the whole batch; no partial results are returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use biomarker_extract_models::ResultSet;
use biomarker_extract_pdf::PdfTextReader;

use crate::ExtractError;
use crate::extractor::{extract_record, preview};
use crate::patterns::BiomarkerPattern;
use crate::progress::ProgressCallback;

/// Number of characters of extracted text echoed per file by default.
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Order in which PDFs in the input directory are processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingOrder {
    /// Whatever order the filesystem returns entries in. Not stable across
    /// platforms or even across runs on some filesystems.
    #[default]
    Filesystem,
    /// Sorted by file name, for reproducible output.
    Sorted,
}

/// Options for [`process_directory`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Processing order of the input files.
    pub order: ListingOrder,
    /// Maximum number of characters of text to preview per file.
    pub preview_chars: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            order: ListingOrder::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// Returns `true` if `name` ends in `.pdf`, ignoring case.
#[must_use]
pub fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Lists the entries of `dir` whose names end in `.pdf`.
///
/// # Errors
///
/// Returns [`ExtractError::ListDir`] if the directory cannot be read.
pub fn list_pdf_files(dir: &Path, order: ListingOrder) -> Result<Vec<PathBuf>, ExtractError> {
    let list_err = |source| ExtractError::ListDir {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if is_pdf_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    if order == ListingOrder::Sorted {
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    Ok(files)
}

/// Extracts biomarkers from every PDF in `dir`.
///
/// Each file yields exactly one record, even when it contains no text.
///
/// # Errors
///
/// * [`ExtractError::ListDir`] if `dir` cannot be listed
/// * [`ExtractError::Pdf`] for the first file that cannot be read
pub fn process_directory<R: PdfTextReader + ?Sized>(
    dir: &Path,
    reader: &R,
    patterns: &[BiomarkerPattern],
    options: &BatchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<ResultSet, ExtractError> {
    let files = list_pdf_files(dir, options.order)?;

    log::info!("Found {} PDF file(s) in {}", files.len(), dir.display());
    progress.set_total(files.len() as u64);

    let mut results = ResultSet::with_capacity(files.len());

    for path in &files {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress.set_message(file.clone());

        let text = reader.read_text(path)?;
        progress.println(&preview(
            &path.display().to_string(),
            &text,
            options.preview_chars,
        ));

        results.push(extract_record(&file, &text, patterns));
        progress.inc(1);
    }

    progress.finish(format!("Processed {} file(s)", results.len()));

    Ok(results)
}
