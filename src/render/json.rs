//! JSON rendering for extracted outlines.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Outline, OutlineEntry};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Key names and their order are part of the output contract; an outline
/// with no headings serializes with an empty `outline` array, never a
/// missing one.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Failure report written for a document that could not be processed. The
/// leading fields match the success shape so consumers can read every
/// output file the same way.
#[derive(Serialize)]
struct FailureReport<'a> {
    title: &'a str,
    outline: &'a [OutlineEntry],
    error: &'a str,
}

/// Render the per-document failure JSON.
pub fn failure_json(message: &str, format: JsonFormat) -> Result<String> {
    let report = FailureReport {
        title: "",
        outline: &[],
        error: message,
    };
    serialize(&report, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> Outline {
        Outline {
            title: "Understanding AI".to_string(),
            outline: vec![
                OutlineEntry {
                    level: HeadingLevel::H1,
                    text: "1. History".to_string(),
                    page: 2,
                },
                OutlineEntry {
                    level: HeadingLevel::H3,
                    text: "Early Work".to_string(),
                    page: 2,
                },
            ],
        }
    }

    #[test]
    fn test_compact_matches_contract() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Understanding AI","outline":[{"level":"H1","text":"1. History","page":2},{"level":"H3","text":"Early Work","page":2}]}"#
        );
    }

    #[test]
    fn test_pretty_has_newlines() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"title\""));
    }

    #[test]
    fn test_empty_outline_serializes_empty_array() {
        let json = to_json(&Outline::empty(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }

    #[test]
    fn test_failure_json_shape() {
        let json = failure_json("Document is encrypted", JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"","outline":[],"error":"Document is encrypted"}"#
        );
    }

    #[test]
    fn test_round_trip() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let back: Outline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
