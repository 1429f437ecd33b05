//! Document-wide font statistics.

use std::collections::HashMap;

use super::Line;

/// Minimum word count for a line to count as paragraph-like when picking the
/// body text size. Short decorative lines (cover art, page numbers) would
/// otherwise skew the mode.
const MIN_BODY_WORDS: usize = 4;

/// Immutable document-wide statistics, computed once over the full line
/// sequence and shared read-only by the classifier.
#[derive(Debug, Clone, Default)]
pub struct DocumentProfile {
    /// Maximum representative font size over all lines
    pub max_font_size: f32,
    /// Most common font size among paragraph-like lines
    pub body_font_size: f32,
    /// Frequency table of font sizes, keyed at 0.1pt precision
    pub size_histogram: HashMap<i32, usize>,
    /// Total page count of the document
    pub page_count: u32,
}

impl DocumentProfile {
    /// Compute the profile for a document's reading-order line sequence.
    ///
    /// With fewer than two distinct lines the body size falls back to the
    /// maximum size, so downstream ratios stay well-defined.
    pub fn from_lines(lines: &[Line], page_count: u32) -> Self {
        let mut histogram: HashMap<i32, usize> = HashMap::new();
        let mut body_histogram: HashMap<i32, usize> = HashMap::new();
        let mut max_font_size: f32 = 0.0;

        for line in lines {
            max_font_size = max_font_size.max(line.font_size);
            let key = size_key(line.font_size);
            *histogram.entry(key).or_insert(0) += 1;
            if line.word_count() >= MIN_BODY_WORDS {
                *body_histogram.entry(key).or_insert(0) += 1;
            }
        }

        let body_font_size = if lines.len() < 2 {
            max_font_size
        } else {
            mode_size(&body_histogram)
                .or_else(|| mode_size(&histogram))
                .unwrap_or(max_font_size)
        };

        Self {
            max_font_size,
            body_font_size,
            size_histogram: histogram,
            page_count,
        }
    }

    /// A line's font size relative to the document maximum, in [0, 1].
    pub fn relative_size(&self, font_size: f32) -> f32 {
        if self.max_font_size > 0.0 {
            font_size / self.max_font_size
        } else {
            0.0
        }
    }
}

/// Histogram key at 0.1pt precision.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Most frequent size in a histogram; larger size wins a frequency tie so
/// the result is deterministic.
fn mode_size(histogram: &HashMap<i32, usize>) -> Option<f32> {
    histogram
        .iter()
        .max_by_key(|&(key, count)| (*count, *key))
        .map(|(key, _)| *key as f32 / 10.0)
}
