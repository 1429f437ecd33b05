//! Data model for outline extraction.
//!
//! The types here form the pipeline's data contracts: positioned fragments
//! from the decoder, merged lines in reading order, document-wide font
//! statistics, and the final outline structure.

mod fragment;
mod outline;
mod profile;

pub use fragment::{Line, PageFragments, TextFragment};
pub use outline::{ClassifiedLine, HeadingLevel, Label, Outline, OutlineEntry};
pub use profile::DocumentProfile;
