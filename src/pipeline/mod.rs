//! Per-document pipeline and batch processing.
//!
//! One document flows strictly forward: decode, normalize, profile,
//! classify, assemble. The guard wraps the whole pipeline: the page ceiling
//! is checked before any heavy work and the wall-clock budget covers
//! everything from container decode to assembly.

mod batch;
mod guard;

pub use batch::{process_dir, process_dir_with, BatchOptions, BatchReport, DocumentResult};
pub use guard::GuardLimits;

use std::fs;
use std::path::Path;

use crate::decode::PdfDecoder;
use crate::error::{Error, Result};
use crate::layout::{self, ClassifierConfig};
use crate::model::{DocumentProfile, Outline};

/// Extract the outline of a PDF file with the default limits.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<Outline> {
    extract_outline_with_limits(path, &GuardLimits::default())
}

/// Extract the outline of a PDF file under explicit limits.
pub fn extract_outline_with_limits<P: AsRef<Path>>(path: P, limits: &GuardLimits) -> Result<Outline> {
    let data = fs::read(path)?;
    extract_outline_from_bytes(&data, limits)
}

/// Extract the outline from in-memory PDF bytes under explicit limits.
///
/// A document with no extractable text is not an error: it produces an
/// empty outline with an empty title.
pub fn extract_outline_from_bytes(data: &[u8], limits: &GuardLimits) -> Result<Outline> {
    crate::detect::verify_bytes(data)?;

    let owned = data.to_vec();
    let limits_inner = limits.clone();
    guard::run_with_budget(limits.timeout, move || run_pipeline(&owned, &limits_inner))
}

/// The sequential per-document pipeline, run inside the guard.
fn run_pipeline(data: &[u8], limits: &GuardLimits) -> Result<Outline> {
    let decoder = PdfDecoder::from_bytes(data)?;

    let page_count = decoder.page_count();
    if page_count > limits.max_pages {
        return Err(Error::PageLimitExceeded {
            pages: page_count,
            limit: limits.max_pages,
        });
    }

    let pages = decoder.decode_pages()?;
    if !PdfDecoder::has_extractable_text(&pages) {
        log::debug!("no extractable text; emitting empty outline");
        return Ok(Outline::empty());
    }

    let lines = layout::normalize_pages(&pages);
    if lines.is_empty() {
        return Ok(Outline::empty());
    }

    let profile = DocumentProfile::from_lines(&lines, page_count);
    let classified = layout::classify_lines(&lines, &profile, &ClassifierConfig::default());
    Ok(layout::assemble(&classified, &profile))
}
