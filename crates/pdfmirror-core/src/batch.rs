//! Sequential batch pipeline: discover, extract, write, report.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::discovery::{PdfFileRef, discover_pdfs};
use crate::error::{ConvertError, PdfError, Result};
use crate::pdf::{PdfExtractor, PdfProcessor, extract_file};
use crate::writer::write_text;

/// Receives progress events from a [`Batch`] run.
///
/// Every discovered file produces exactly one of `file_saved` or `file_failed`.
pub trait Reporter {
    /// The output root exists and discovery is about to start.
    fn output_ready(&mut self, output_root: &Path);

    /// Discovery found nothing to convert.
    fn nothing_found(&mut self, input_root: &Path);

    /// Discovery finished with `total` files.
    fn run_started(&mut self, total: usize);

    /// File `index` (1-based) of `total` is about to be processed.
    fn file_started(&mut self, index: usize, total: usize, file: &PdfFileRef);

    /// One page of `file` could not be extracted.
    fn page_failed(&mut self, file: &PdfFileRef, error: &PdfError);

    /// `file` parsed but yielded no text; an empty output file will be written.
    fn empty_text(&mut self, file: &PdfFileRef);

    /// Text of `file` was written to `output`.
    fn file_saved(&mut self, file: &PdfFileRef, output: &Path, bytes: u64);

    /// `path` was skipped or failed; relative to the input root when known.
    fn file_failed(&mut self, path: &Path, error: &ConvertError);

    /// All files were processed.
    fn run_finished(&mut self, summary: &RunSummary);
}

/// Outcome of converting one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Text written to `output`.
    Saved { output: PathBuf, bytes: u64 },
    /// Nothing written.
    Failed(ConvertError),
}

/// A file that was skipped or failed, with its error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files found by discovery.
    pub discovered: usize,
    /// Files whose text was written.
    pub succeeded: usize,
    /// Files skipped or failed.
    pub failed: usize,
    /// Directory the output tree was written to.
    pub output_root: PathBuf,
    /// Wall-clock time of the run.
    pub elapsed_ms: u64,
    /// Failed files in processing order.
    pub failures: Vec<FailedFile>,
}

impl RunSummary {
    fn record(&mut self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Saved { .. } => self.succeeded += 1,
            FileOutcome::Failed(error) => {
                self.failed += 1;
                self.failures.push(FailedFile {
                    path: path.to_path_buf(),
                    error: error.to_string(),
                });
            }
        }
    }

    /// Every discovered file was counted exactly once.
    pub fn is_complete(&self) -> bool {
        self.succeeded + self.failed == self.discovered
    }
}

/// A prepared conversion run.
///
/// Construction validates the input root and creates the output root, so the
/// two fatal conditions surface before any file is touched.
pub struct Batch<P = PdfExtractor> {
    config: ConvertConfig,
    processor: PhantomData<P>,
}

impl Batch<PdfExtractor> {
    /// Prepare a run that extracts with lopdf.
    pub fn new(config: ConvertConfig) -> Result<Self> {
        Self::with_processor(config)
    }
}

impl<P: PdfProcessor + Default> Batch<P> {
    /// Prepare a run that extracts with processor `P`.
    pub fn with_processor(config: ConvertConfig) -> Result<Self> {
        Ok(Self {
            config: config.prepare()?,
            processor: PhantomData,
        })
    }

    /// The prepared configuration, with absolute roots.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert every discovered PDF, one at a time.
    pub fn run<R: Reporter>(&self, reporter: &mut R) -> Result<RunSummary> {
        let start = Instant::now();
        reporter.output_ready(&self.config.output_root);

        let files = discover_pdfs(&self.config.input_root)?;
        let mut summary = RunSummary {
            discovered: files.len(),
            output_root: self.config.output_root.clone(),
            ..RunSummary::default()
        };

        if files.is_empty() {
            reporter.nothing_found(&self.config.input_root);
            summary.elapsed_ms = start.elapsed().as_millis() as u64;
            return Ok(summary);
        }

        let total = files.len();
        reporter.run_started(total);

        for (i, path) in files.into_iter().enumerate() {
            let file = match PdfFileRef::resolve(&self.config.input_root, path.clone()) {
                Ok(file) => file,
                Err(e) => {
                    reporter.file_failed(&path, &e);
                    summary.record(&path, &FileOutcome::Failed(e));
                    continue;
                }
            };

            reporter.file_started(i + 1, total, &file);
            let outcome = self.convert(&file, reporter);
            match &outcome {
                FileOutcome::Saved { output, bytes } => reporter.file_saved(&file, output, *bytes),
                FileOutcome::Failed(e) => reporter.file_failed(&file.relative, e),
            }
            summary.record(&file.relative, &outcome);
        }

        summary.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Run finished: {} discovered, {} succeeded, {} failed in {}ms",
            summary.discovered, summary.succeeded, summary.failed, summary.elapsed_ms
        );
        reporter.run_finished(&summary);
        Ok(summary)
    }

    /// Extract one file and write its mirrored text file.
    pub fn convert<R: Reporter>(&self, file: &PdfFileRef, reporter: &mut R) -> FileOutcome {
        let file_start = Instant::now();
        let output = file.output_path(&self.config.output_root, &self.config.extension);

        let extraction = match extract_file::<P>(&file.path) {
            Ok(extraction) => extraction,
            Err(e) => return FileOutcome::Failed(e.into()),
        };

        for error in &extraction.page_errors {
            reporter.page_failed(file, error);
        }
        if extraction.is_empty() {
            reporter.empty_text(file);
        }

        let outcome = match write_text(&output, &extraction.text) {
            Ok(bytes) => FileOutcome::Saved { output, bytes },
            Err(e) => FileOutcome::Failed(e),
        };

        debug!(
            "{}: {} pages in {}ms",
            file.relative.display(),
            extraction.page_count,
            file_start.elapsed().as_millis()
        );
        outcome
    }
}
