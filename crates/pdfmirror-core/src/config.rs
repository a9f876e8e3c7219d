//! Run configuration.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConvertError, Result};

/// Suffix given to output files when none is configured.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Roots and naming for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Directory tree scanned for PDF files.
    pub input_root: PathBuf,

    /// Directory tree that receives the extracted text files.
    pub output_root: PathBuf,

    /// Suffix of output files, without the leading dot.
    pub extension: String,
}

impl ConvertConfig {
    /// Create a configuration with the default text suffix.
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the output suffix. A leading dot is stripped; an empty value keeps the default.
    pub fn with_extension(mut self, extension: &str) -> Self {
        let extension = extension.trim().trim_start_matches('.');
        if !extension.is_empty() {
            self.extension = extension.to_string();
        }
        self
    }

    /// Validate the input root and create the output root.
    ///
    /// The input root is checked first, so a missing input never leaves an
    /// output directory behind. Both roots come back absolute.
    pub fn prepare(&self) -> Result<Self> {
        if !self.input_root.is_dir() {
            return Err(ConvertError::InputRootNotFound(self.input_root.clone()));
        }
        let input_root = fs::canonicalize(&self.input_root)
            .map_err(|_| ConvertError::InputRootNotFound(self.input_root.clone()))?;

        let create_failed = |source| ConvertError::OutputRootCreateFailed {
            path: self.output_root.clone(),
            source,
        };
        fs::create_dir_all(&self.output_root).map_err(create_failed)?;
        let output_root = fs::canonicalize(&self.output_root).map_err(create_failed)?;

        debug!(
            "Prepared roots: input={}, output={}",
            input_root.display(),
            output_root.display()
        );

        Ok(Self {
            input_root,
            output_root,
            extension: self.extension.clone(),
        })
    }
}
