//! Recursive PDF discovery and mirrored path computation.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::error::{ConvertError, Result};

/// File suffix matched during discovery, compared case-insensitively.
pub const PDF_SUFFIX: &str = "pdf";

/// One discovered input file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PdfFileRef {
    /// Absolute path of the PDF.
    pub path: PathBuf,
    /// Path of the PDF relative to the input root.
    pub relative: PathBuf,
}

impl PdfFileRef {
    /// Resolve `path` against `root`.
    pub fn resolve(root: &Path, path: PathBuf) -> Result<Self> {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => {
                return Err(ConvertError::RelativePathUnresolvable {
                    path,
                    root: root.to_path_buf(),
                });
            }
        };
        Ok(Self { path, relative })
    }

    /// Mirrored output path: the relative path under `output_root` with its
    /// final suffix replaced by `extension`.
    pub fn output_path(&self, output_root: &Path, extension: &str) -> PathBuf {
        output_root.join(self.relative.with_extension(extension))
    }
}

/// True when `name` ends in `.pdf`, in any letter case.
///
/// Compares raw bytes so names that are not valid UTF-8 still match.
fn has_pdf_suffix(name: &OsStr) -> bool {
    let name = name.as_encoded_bytes();
    let suffix_len = PDF_SUFFIX.len() + 1;
    name.len() >= suffix_len && {
        let (dot, ext) = name[name.len() - suffix_len..].split_at(1);
        dot == b"." && ext.eq_ignore_ascii_case(PDF_SUFFIX.as_bytes())
    }
}

/// Find every file under `root` whose name ends in `.pdf`, in any letter case.
///
/// Paths come back deduplicated and sorted. Directories named like PDFs are
/// skipped, as are entries the walk cannot read.
pub fn discover_pdfs(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(ConvertError::InputRootNotFound(root.to_path_buf()));
    }
    debug!("Discovering PDFs under {}", root.display());

    let mut found = BTreeSet::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!("Skipping unreadable path {}: {}", path.display(), e);
                continue;
            }
        };
        if !has_pdf_suffix(entry.file_name()) {
            continue;
        }
        if entry.file_type().is_file() {
            trace!("Discovered {}", entry.path().display());
            found.insert(entry.into_path());
        } else {
            trace!("Skipping non-file match {}", entry.path().display());
        }
    }

    debug!("Discovered {} PDF file(s) under {}", found.len(), root.display());
    Ok(found.into_iter().collect())
}
