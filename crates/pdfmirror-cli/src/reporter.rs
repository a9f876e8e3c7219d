//! Line-oriented console progress for a conversion run.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use console::style;

use pdfmirror_core::{ConvertError, PdfError, PdfFileRef, Reporter, RunSummary};

/// How the final summary is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable summary block
    Text,
    /// JSON document on stdout
    Json,
}

/// Prints one line per event to `out`.
pub struct ConsoleReporter<W: Write> {
    out: W,
    format: SummaryFormat,
    output_root: PathBuf,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, format: SummaryFormat) -> Self {
        Self {
            out,
            format,
            output_root: PathBuf::new(),
        }
    }

    fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
    }

    /// `path` relative to the output root, or its file name when outside it.
    fn relative_output(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.output_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.file_name().map(PathBuf::from).unwrap_or_default(),
        }
    }

    fn separator(&mut self, width: usize) {
        self.line("-".repeat(width));
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn output_ready(&mut self, output_root: &Path) {
        self.output_root = output_root.to_path_buf();
        self.line(format!(
            "{} Output will be saved within: {}",
            style("ℹ").blue(),
            output_root.display()
        ));
    }

    fn nothing_found(&mut self, input_root: &Path) {
        self.line(format!(
            "{} No PDF files found recursively in {}",
            style("ℹ").blue(),
            input_root.display()
        ));
    }

    fn run_started(&mut self, total: usize) {
        self.line(format!(
            "{} Found {} PDF file(s) recursively.",
            style("ℹ").blue(),
            total
        ));
        self.separator(20);
    }

    fn file_started(&mut self, index: usize, total: usize, file: &PdfFileRef) {
        self.line(format!(
            "Processing file {} of {}: [{}]",
            index,
            total,
            file.relative.display()
        ));
    }

    fn page_failed(&mut self, file: &PdfFileRef, error: &PdfError) {
        self.line(format!(
            "{} {} in {}",
            style("✗").red(),
            error,
            file.relative.display()
        ));
    }

    fn empty_text(&mut self, file: &PdfFileRef) {
        self.line(format!(
            "{} No text extracted from {}. It might be image-based.",
            style("Warning:").yellow(),
            file.relative.display()
        ));
    }

    fn file_saved(&mut self, _file: &PdfFileRef, output: &Path, bytes: u64) {
        let rel = self.relative_output(output);
        self.line(format!(
            "{} Successfully saved text to: {} ({} bytes)",
            style("✓").green(),
            rel.display(),
            bytes
        ));
        self.separator(10);
    }

    fn file_failed(&mut self, path: &Path, error: &ConvertError) {
        match error {
            ConvertError::RelativePathUnresolvable { .. } => {
                self.line(format!(
                    "{} {}. Skipping file.",
                    style("Warning:").yellow(),
                    error
                ));
                return;
            }
            ConvertError::Pdf(e) if e.is_decryption_failure() => {
                self.line(format!(
                    "{} Could not decrypt {}. Skipping. Error: {}",
                    style("✗").red(),
                    path.display(),
                    e
                ));
            }
            ConvertError::Pdf(e) => {
                self.line(format!(
                    "{} An error occurred while processing {}: {}",
                    style("✗").red(),
                    path.display(),
                    e
                ));
            }
            other => {
                self.line(format!("{} {}", style("✗").red(), other));
            }
        }
        if matches!(error, ConvertError::Pdf(_)) {
            self.line(format!(
                "No text extracted for the file corresponding to {}, nothing to save.",
                path.display()
            ));
        }
        self.separator(10);
    }

    fn run_finished(&mut self, summary: &RunSummary) {
        if self.format != SummaryFormat::Text {
            return;
        }

        self.line("");
        self.line("=".repeat(20));
        self.line("Recursive Batch Processing Summary:");
        self.line(format!("Total PDF files found: {}", summary.discovered));
        self.line(format!(
            "Successfully processed and saved: {}",
            style(summary.succeeded).green()
        ));
        self.line(format!("Failed or skipped: {}", style(summary.failed).red()));
        self.line(format!("Output saved in: {}", summary.output_root.display()));
        self.line(format!("Elapsed: {}ms", summary.elapsed_ms));
        self.line("=".repeat(20));

        if !summary.failures.is_empty() {
            self.line("");
            self.line(style("Failed files:").red());
            for failure in &summary.failures {
                self.line(format!("  - {}: {}", failure.path.display(), failure.error));
            }
        }
    }
}
