//! Core library for mirroring a tree of PDF files as plain text.
//!
//! This crate provides:
//! - Recursive, case-insensitive PDF discovery under an input root
//! - Per-page text extraction with empty-password decryption
//! - Mirrored output paths and text file writing
//! - A sequential batch pipeline that reports progress through [`Reporter`]

pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod pdf;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{Batch, FailedFile, FileOutcome, Reporter, RunSummary};
pub use config::ConvertConfig;
pub use discovery::{PdfFileRef, discover_pdfs};
pub use error::{ConvertError, PdfError, Result};
pub use pdf::{Extraction, PdfExtractor, PdfProcessor, extract_file};
pub use writer::write_text;
