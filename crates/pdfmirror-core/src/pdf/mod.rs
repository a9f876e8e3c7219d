//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PdfError;

/// Appended after the text of every page that produced some.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text extracted from one document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Concatenated page text, each non-empty page followed by [`PAGE_SEPARATOR`].
    pub text: String,
    /// Number of pages in the document.
    pub page_count: u32,
    /// Pages whose text could not be extracted; they contribute nothing to `text`.
    pub page_errors: Vec<PdfError>,
}

impl Extraction {
    /// True when no page produced any text, e.g. a scanned document.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes, decrypting it with the empty password if needed.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract text from every page in order.
    ///
    /// A page that fails is recorded in [`Extraction::page_errors`] and the
    /// remaining pages are still processed.
    fn extract_text(&self) -> Extraction {
        let page_count = self.page_count();
        let mut extraction = Extraction {
            page_count,
            ..Extraction::default()
        };

        for page in 1..=page_count {
            match self.extract_page_text(page) {
                Ok(text) if !text.is_empty() => {
                    extraction.text.push_str(&text);
                    extraction.text.push_str(PAGE_SEPARATOR);
                }
                Ok(_) => debug!("Page {} has no text", page),
                Err(e) => extraction.page_errors.push(e),
            }
        }

        extraction
    }
}

/// Read the PDF at `path` and extract its text with processor `P`.
pub fn extract_file<P: PdfProcessor + Default>(path: &Path) -> Result<Extraction> {
    let data = fs::read(path)?;
    let mut processor = P::default();
    processor.load(&data)?;
    Ok(processor.extract_text())
}
