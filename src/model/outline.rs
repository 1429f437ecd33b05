//! Outline structure and classification labels.

use serde::{Deserialize, Serialize};

use super::Line;

/// Heading depth exposed in the output contract.
///
/// `H1` is the shallowest level; the derived ordering follows depth, so
/// `H1 < H2 < H3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth: 1 for H1 through 3 for H3.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// The level's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification label assigned to every line.
///
/// `Body` is a frequent, valid output; `Title` marks a cover-title
/// candidate and never appears in the outline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    H1,
    H2,
    H3,
    Body,
}

impl Label {
    /// The heading level carried by this label, if any.
    pub fn heading_level(self) -> Option<HeadingLevel> {
        match self {
            Label::H1 => Some(HeadingLevel::H1),
            Label::H2 => Some(HeadingLevel::H2),
            Label::H3 => Some(HeadingLevel::H3),
            Label::Title | Label::Body => None,
        }
    }

    /// Whether this label marks a heading (H1 through H3).
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}

impl From<HeadingLevel> for Label {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Label::H1,
            HeadingLevel::H2 => Label::H2,
            HeadingLevel::H3 => Label::H3,
        }
    }
}

/// A line plus its assigned label and a confidence score.
///
/// The confidence is used only for internal tie-breaking and is not part of
/// the output contract.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    pub line: Line,
    pub label: Label,
    pub confidence: f32,
}

/// One outline entry. Field order matches the output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// The extracted outline: a title (possibly empty, never fabricated) and the
/// ordered heading entries. Field order matches the output contract;
/// `outline` serializes as `[]` when no headings were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl Outline {
    /// An outline with no title and no entries, the result for documents
    /// with no extractable text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of heading entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2 < HeadingLevel::H3);
        assert_eq!(HeadingLevel::H2.depth(), 2);
    }

    #[test]
    fn test_level_serializes_as_wire_name() {
        let json = serde_json::to_string(&HeadingLevel::H1).unwrap();
        assert_eq!(json, "\"H1\"");
    }

    #[test]
    fn test_label_heading_level() {
        assert_eq!(Label::H2.heading_level(), Some(HeadingLevel::H2));
        assert_eq!(Label::Title.heading_level(), None);
        assert_eq!(Label::Body.heading_level(), None);
        assert!(Label::H3.is_heading());
        assert!(!Label::Body.is_heading());
    }

    #[test]
    fn test_outline_field_order() {
        let outline = Outline {
            title: "T".to_string(),
            outline: vec![OutlineEntry {
                level: HeadingLevel::H1,
                text: "Intro".to_string(),
                page: 1,
            }],
        };
        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","outline":[{"level":"H1","text":"Intro","page":1}]}"#
        );
    }

    #[test]
    fn test_empty_outline_keeps_array() {
        let json = serde_json::to_string(&Outline::empty()).unwrap();
        assert_eq!(json, r#"{"title":"","outline":[]}"#);
    }
}
