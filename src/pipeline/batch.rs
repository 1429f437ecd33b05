//! Batch driver: process every PDF in a directory.
//!
//! Documents are independent units of work on a bounded worker pool. One
//! failing document never aborts the batch: its failure is recorded in the
//! report and an error JSON is still written, so every input file has
//! exactly one output file.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Outline;
use crate::render::{self, JsonFormat};

use super::{extract_outline_from_bytes, GuardLimits};

/// Attempts for reading an input file before giving up. Only the read is
/// retried; extraction is deterministic and never retried.
const READ_ATTEMPTS: u32 = 3;

/// Options for a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Per-document limits
    pub limits: GuardLimits,
    /// Worker pool size; 0 means one worker per available core
    pub jobs: usize,
    /// Output JSON format
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-document limits.
    pub fn with_limits(mut self, limits: GuardLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the worker pool size.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Set the output JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

/// Outcome for one input file.
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Input PDF path
    pub input: PathBuf,
    /// Output JSON path
    pub output: PathBuf,
    /// Number of outline entries produced
    pub headings: usize,
    /// Failure message, if the document failed
    pub error: Option<String>,
}

impl DocumentResult {
    /// Whether the document was processed successfully.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Report for a whole batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-document outcomes, in input order
    pub results: Vec<DocumentResult>,
}

impl BatchReport {
    /// Number of successfully processed documents.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Process every `*.pdf` file in `input_dir`, writing `<stem>.json` files
/// into `output_dir`.
///
/// # Errors
///
/// Only setup failures (missing input directory, unwritable output
/// directory) are returned as errors; per-document failures are recorded in
/// the report.
pub fn process_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_dir_with(input_dir, output_dir, options, |_| {})
}

/// Like [`process_dir`], invoking `progress` as each document finishes.
pub fn process_dir_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&DocumentResult) + Sync,
{
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    if !input_dir.is_dir() {
        return Err(Error::Other(format!(
            "input directory not found: {}",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    log::info!("processing {} PDF file(s)", files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
        .map_err(|e| Error::Other(format!("failed to build worker pool: {}", e)))?;

    let results: Vec<DocumentResult> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = process_one(path, output_dir, options);
                progress(&result);
                result
            })
            .collect()
    });

    Ok(BatchReport { results })
}

/// Process a single document end to end, including writing its JSON file.
fn process_one(path: &Path, output_dir: &Path, options: &BatchOptions) -> DocumentResult {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let output = output_dir.join(format!("{stem}.json"));

    match extract_one(path, options).and_then(|outline| {
        let json = render::to_json(&outline, options.format)?;
        fs::write(&output, json)?;
        Ok(outline)
    }) {
        Ok(outline) => DocumentResult {
            input: path.to_path_buf(),
            output,
            headings: outline.len(),
            error: None,
        },
        Err(err) => {
            log::warn!("failed to process {}: {}", path.display(), err);
            if let Ok(json) = render::failure_json(&err.to_string(), options.format) {
                let _ = fs::write(&output, json);
            }
            DocumentResult {
                input: path.to_path_buf(),
                output,
                headings: 0,
                error: Some(err.to_string()),
            }
        }
    }
}

fn extract_one(path: &Path, options: &BatchOptions) -> Result<Outline> {
    let data = read_with_retry(path)?;
    extract_outline_from_bytes(&data, &options.limits)
}

/// Read a file, retrying transient I/O failures a fixed number of times.
fn read_with_retry(path: &Path) -> Result<Vec<u8>> {
    for attempt in 1..READ_ATTEMPTS {
        match fs::read(path) {
            Ok(data) => return Ok(data),
            Err(e) => {
                log::debug!(
                    "read attempt {} failed for {}: {}",
                    attempt,
                    path.display(),
                    e
                );
            }
        }
    }
    Ok(fs::read(path)?)
}
