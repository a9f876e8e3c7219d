//! Persisting extracted text.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ConvertError, Result};

/// Write `text` as UTF-8 to `path`, creating missing parent directories and
/// replacing any existing file. Returns the number of bytes written.
pub fn write_text(path: &Path, text: &str) -> Result<u64> {
    let write_failed = |source| ConvertError::FileWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, text.as_bytes()).map_err(write_failed)?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(text.len() as u64)
}
