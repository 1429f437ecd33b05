//! PDF decoding: container access and content-stream text extraction.
//!
//! This layer turns a PDF file into [`PageFragments`](crate::model::PageFragments):
//! positioned, styled text runs plus page geometry. Everything downstream
//! works on those fragments and never touches the PDF container again.

mod content;
mod decoder;

pub use decoder::PdfDecoder;
