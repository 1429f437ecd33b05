//! Positioned text fragments and merged lines.

/// A single positioned run of text as emitted by the decoder.
///
/// Fragments are ephemeral: the normalizer consumes them and produces
/// [`Line`]s, which are what the rest of the pipeline works with.
#[derive(Debug, Clone)]
pub struct TextFragment {
    /// Page number (1-indexed)
    pub page: u32,
    /// The text content
    pub text: String,
    /// Left edge in page coordinates
    pub x0: f32,
    /// Bottom edge (PDF coordinates grow upward)
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Font name (e.g. "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font name indicates a bold face
    pub bold: bool,
    /// Whether the font name indicates an italic face
    pub italic: bool,
}

impl TextFragment {
    /// Create a fragment from a baseline position.
    ///
    /// The bounding box is approximated from the font size: ascender at
    /// 80% above the baseline, descender at 20% below, and an advance of
    /// half the font size per character.
    pub fn new(page: u32, text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        let italic = lower.contains("italic") || lower.contains("oblique");

        let advance = font_size * 0.5 * text.chars().count() as f32;

        Self {
            page,
            x0: x,
            y0: y - font_size * 0.2,
            x1: x + advance,
            y1: y + font_size * 0.8,
            font_name,
            font_size,
            bold,
            italic,
            text,
        }
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether the fragment carries no usable content: empty text or a
    /// degenerate (zero-area) bounding box.
    pub fn is_degenerate(&self) -> bool {
        self.text.trim().is_empty() || self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// All fragments decoded from one page, with the page geometry needed to
/// express vertical positions as fractions of the page height.
#[derive(Debug, Clone)]
pub struct PageFragments {
    /// Page number (1-indexed)
    pub page: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Decoded fragments, in content-stream order
    pub fragments: Vec<TextFragment>,
}

impl PageFragments {
    /// Create an empty fragment set for a page.
    pub fn new(page: u32, width: f32, height: f32) -> Self {
        Self {
            page,
            width,
            height,
            fragments: Vec::new(),
        }
    }
}

/// One logical text line: fragments merged because they occupy the same
/// visual row.
///
/// Lines are ordered by (page, top-to-bottom, left-to-right); that reading
/// order is the canonical ordering used by every downstream stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Page number (1-indexed)
    pub page: u32,
    /// Concatenated text, internal whitespace collapsed
    pub text: String,
    /// Representative font size (max of the constituent fragments)
    pub font_size: f32,
    /// True if any constituent fragment is bold
    pub bold: bool,
    /// True if any constituent fragment is italic
    pub italic: bool,
    /// Vertical position as a fraction of page height; 0 is the top edge
    pub y_frac: f32,
    /// Horizontal start position in page coordinates
    pub x: f32,
}

impl Line {
    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
