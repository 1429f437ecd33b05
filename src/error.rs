//! Error types for the outpdf library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for outpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting an outline.
///
/// All variants are per-document failures: the batch driver reports them and
/// moves on to the next file. A document with no extractable text is *not* an
/// error and produces an empty outline instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version marker is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted; decryption is not attempted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF container or a content stream could not be decoded.
    #[error("PDF decode error: {0}")]
    Decode(String),

    /// The document has more pages than the configured ceiling.
    #[error("Document has {pages} pages, exceeding the limit of {limit}")]
    PageLimitExceeded { pages: u32, limit: u32 },

    /// The per-document wall-clock budget was exhausted mid-pipeline.
    #[error("Processing exceeded the {:.0} second budget", .limit.as_secs_f64())]
    Timeout { limit: Duration },

    /// Error serializing the outline.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageLimitExceeded {
            pages: 80,
            limit: 50,
        };
        assert_eq!(
            err.to_string(),
            "Document has 80 pages, exceeding the limit of 50"
        );

        let err = Error::Timeout {
            limit: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "Processing exceeded the 10 second budget");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
