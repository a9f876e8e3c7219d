//! Error types for the pdfmirror-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for a conversion run.
///
/// `InputRootNotFound` and `OutputRootCreateFailed` abort the run. Every other
/// variant is scoped to a single file and only increments the failure count.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input root is missing or is not a directory.
    #[error("input root not found at {}", .0.display())]
    InputRootNotFound(PathBuf),

    /// The output root could not be created.
    #[error("could not create output root {}: {source}", .path.display())]
    OutputRootCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered file has no path relative to the input root.
    #[error(
        "could not determine relative path for {} under {}",
        .path.display(),
        .root.display()
    )]
    RelativePathUnresolvable { path: PathBuf, root: PathBuf },

    /// The PDF could not be read, parsed or decrypted.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// Creating the output directories or writing the text failed.
    #[error("error writing text to file {}: {source}", .path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the file from disk.
    #[error("failed to read PDF: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to open/parse the PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and the empty password does not open it.
    #[error("could not decrypt PDF: {0}")]
    DecryptionFailed(String),

    /// Failed to extract text from one page.
    #[error("failed to extract text from page {page}: {message}")]
    PageExtraction { page: u32, message: String },

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// No document has been loaded yet.
    #[error("no document loaded")]
    NotLoaded,
}

impl PdfError {
    /// Whether the whole document was skipped because it could not be decrypted.
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, PdfError::DecryptionFailed(_))
    }
}

/// Result type for the pdfmirror library.
pub type Result<T> = std::result::Result<T, ConvertError>;
