//! # outpdf
//!
//! Structured outline extraction from PDF documents.
//!
//! outpdf infers a document's heading structure (a title plus H1/H2/H3
//! entries with page numbers) from visual layout alone: font metrics,
//! position on the page, and textual patterns. It never reads embedded
//! bookmark trees, so it works on documents that carry none.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outpdf::{extract_outline, render, JsonFormat};
//!
//! fn main() -> outpdf::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Decode**: lopdf-based content-stream walk yielding positioned,
//!   styled text fragments per page
//! - **Normalize**: fragments merged into reading-order lines
//! - **Profile**: document-wide font statistics
//! - **Classify**: every line labeled Title, H1-H3, or Body by an ordered
//!   rule pipeline (pure per line, so classification runs in parallel)
//! - **Assemble**: title selection, running-header suppression, final
//!   outline
//!
//! Each document runs under a page ceiling and a wall-clock budget; batch
//! processing isolates per-document failures.

pub mod decode;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod render;

pub use decode::PdfDecoder;
pub use error::{Error, Result};
pub use layout::ClassifierConfig;
pub use model::{
    ClassifiedLine, DocumentProfile, HeadingLevel, Label, Line, Outline, OutlineEntry,
    PageFragments, TextFragment,
};
pub use pipeline::{
    extract_outline, extract_outline_from_bytes, extract_outline_with_limits, process_dir,
    process_dir_with, BatchOptions, BatchReport, DocumentResult, GuardLimits,
};
pub use render::JsonFormat;

use std::path::Path;

/// Extract a PDF's outline and render it as JSON in one call.
///
/// # Example
///
/// ```no_run
/// use outpdf::{outline_json, JsonFormat};
///
/// let json = outline_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn outline_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline(path)?;
    render::to_json(&outline, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_json_missing_file() {
        let result = outline_json("/nonexistent.pdf", JsonFormat::Compact);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_public_defaults() {
        assert_eq!(GuardLimits::default().max_pages, 50);
        assert_eq!(JsonFormat::default(), JsonFormat::Pretty);
    }
}
