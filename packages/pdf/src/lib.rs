#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page-by-page PDF text extraction for lab reports.
//!
//! Lab reports arrive as PDFs, but everything downstream works on plain
//! text. This crate hides the PDF library behind the [`PdfTextReader`]
//! trait so the batch driver can be exercised with in-memory fakes, and
//! provides [`PdfExtractReader`], the pure-Rust implementation backed by
//! [`pdf_extract`].

pub mod pages;

use std::path::Path;

pub use pages::join_pages;

/// Errors specific to PDF text extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The PDF file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the file that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The PDF could not be parsed or its text could not be extracted.
    #[error("failed to extract text from {path}: {message}")]
    Extraction {
        /// Path of the offending file.
        path: String,
        /// Description reported by the PDF library.
        message: String,
    },
}

/// Source of per-page text for a PDF document.
///
/// Each element of the returned vector corresponds to one page, in page
/// order. `None` means the page yielded no text at all.
pub trait PdfTextReader {
    /// Reads the text of every page of the PDF at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the file cannot be opened or is not a
    /// readable PDF.
    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, PdfError>;

    /// Reads every page and joins the non-empty ones with newlines.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PdfTextReader::read_pages`].
    fn read_text(&self, path: &Path) -> Result<String, PdfError> {
        let pages = self.read_pages(path)?;
        Ok(join_pages(&pages))
    }
}

/// [`PdfTextReader`] backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractReader;

impl PdfTextReader for PdfExtractReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, PdfError> {
        // The file handle is released as soon as the bytes are in memory.
        let bytes = std::fs::read(path).map_err(|source| PdfError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!("Read {} bytes from {}", bytes.len(), path.display());

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            PdfError::Extraction {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        log::debug!("Extracted {} page(s) from {}", pages.len(), path.display());

        Ok(pages
            .into_iter()
            .map(|page| if page.is_empty() { None } else { Some(page) })
            .collect())
    }
}
