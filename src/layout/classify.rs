//! Heading classification.
//!
//! Each line is labeled independently of its neighbors: classification is a
//! pure function of the line and the document profile, which is what allows
//! the per-line parallelism in [`classify_lines`].
//!
//! The decision is an ordered rule pipeline:
//!
//! 1. a textual pattern (numbering scheme, bullet glyph, section keyword)
//!    pins a minimum heading level;
//! 2. relative size, boldness, and page position refine the label at or
//!    above that pin, never below it;
//! 3. long lines are demoted to body text, but only when no pattern matched.
//!
//! Ties break toward the shallower level so behavior stays reproducible.

use rayon::prelude::*;
use regex::Regex;

use crate::model::{ClassifiedLine, DocumentProfile, HeadingLevel, Label, Line};

/// Signal weights for the refinement step. Size dominates; style and
/// position nudge; a pattern outweighs style and position combined.
const SIZE_WEIGHT: f32 = 0.6;
const STYLE_WEIGHT: f32 = 0.2;
const POSITION_WEIGHT: f32 = 0.2;
const PATTERN_WEIGHT: f32 = 0.5;

/// Bullet glyphs that mark list-like H3 candidates.
const BULLET_GLYPHS: [char; 4] = ['\u{2022}', '\u{25CF}', '-', '\u{25CB}'];

/// Tunable thresholds for the classifier.
///
/// The defaults are the calibrated values; they are configuration, not
/// contract. Larger, bolder, or more specifically patterned lines always
/// classify at the same or a shallower level than weaker ones.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Relative size above which a line is H1-sized
    pub h1_size_ratio: f32,
    /// Relative size above which a line is H2-sized
    pub h2_size_ratio: f32,
    /// Relative size above which a line is H3-sized
    pub h3_size_ratio: f32,
    /// Vertical fraction below which a line counts as top-of-page
    pub top_of_page: f32,
    /// Word count above which an unpatterned line is demoted to body
    pub max_heading_words: usize,
    numbering: Regex,
    keyword: Regex,
}

impl ClassifierConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self {
            h1_size_ratio: 0.80,
            h2_size_ratio: 0.50,
            h3_size_ratio: 0.30,
            top_of_page: 0.15,
            max_heading_words: 15,
            numbering: Regex::new(r"^(\d+(?:\.\d+)*)[.)]?\s+").expect("valid numbering pattern"),
            keyword: Regex::new(r"(?i)^(chapter|section|part)\b").expect("valid keyword pattern"),
        }
    }

    /// The minimum heading level pinned by a leading textual pattern, if any.
    ///
    /// Section keywords pin H1 regardless of size; a numbering scheme pins
    /// by the number of numeral groups ("2" is H1, "2.1" is H2, "2.1.3" is
    /// H3); bullet glyphs pin H3.
    fn pattern_pin(&self, text: &str) -> Option<HeadingLevel> {
        if self.keyword.is_match(text) {
            return Some(HeadingLevel::H1);
        }

        if let Some(caps) = self.numbering.captures(text) {
            let groups = caps[1].split('.').count();
            return Some(match groups {
                1 => HeadingLevel::H1,
                2 => HeadingLevel::H2,
                _ => HeadingLevel::H3,
            });
        }

        let mut chars = text.chars();
        if let (Some(first), rest) = (chars.next(), chars.as_str()) {
            if BULLET_GLYPHS.contains(&first) && !rest.trim().is_empty() {
                return Some(HeadingLevel::H3);
            }
        }

        None
    }

    /// Size tier suggested by the line's relative font size alone.
    fn size_tier(&self, ratio: f32) -> Option<HeadingLevel> {
        if ratio > self.h1_size_ratio {
            Some(HeadingLevel::H1)
        } else if ratio > self.h2_size_ratio {
            Some(HeadingLevel::H2)
        } else if ratio > self.h3_size_ratio {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a single line against the document profile.
///
/// Pure function: no state is carried between lines, and identical inputs
/// always produce the identical label.
pub fn classify_line(
    line: &Line,
    profile: &DocumentProfile,
    config: &ClassifierConfig,
) -> ClassifiedLine {
    let ratio = profile.relative_size(line.font_size);
    let pin = config.pattern_pin(&line.text);

    // A short dominant line at the very top of page 1 is the title
    // candidate.
    if line.page == 1
        && line.y_frac < config.top_of_page
        && ratio > config.h1_size_ratio
        && line.word_count() <= config.max_heading_words
    {
        return ClassifiedLine {
            line: line.clone(),
            label: Label::Title,
            confidence: ratio,
        };
    }

    // Scores indexed by depth: [H1, H2, H3].
    let mut scores = [0.0f32; 3];
    let mut body = 0.0f32;

    let tier = config.size_tier(ratio);
    match tier {
        Some(level) => scores[(level.depth() - 1) as usize] += SIZE_WEIGHT,
        None => body += SIZE_WEIGHT,
    }

    // Bold strengthens whatever tier the size already suggested; italic
    // alone never promotes.
    if line.bold {
        if let Some(level) = tier {
            scores[(level.depth() - 1) as usize] += STYLE_WEIGHT;
        }
    }

    if line.y_frac < config.top_of_page {
        scores[0] += POSITION_WEIGHT;
    }

    if let Some(level) = pin {
        scores[(level.depth() - 1) as usize] += PATTERN_WEIGHT;
    }

    // Argmax over the heading tiers; the strictly-greater comparison makes
    // the shallower level win ties.
    let mut best_idx = 0;
    for idx in 1..scores.len() {
        if scores[idx] > scores[best_idx] {
            best_idx = idx;
        }
    }

    let mut label = if scores[best_idx] > body {
        match best_idx {
            0 => Label::H1,
            1 => Label::H2,
            _ => Label::H3,
        }
    } else {
        Label::Body
    };
    let mut confidence = scores[best_idx].max(body);

    // A pattern pin is a floor: refinement may land shallower, never deeper
    // and never at Body.
    if let Some(pinned) = pin {
        let too_deep = match label.heading_level() {
            Some(level) => level > pinned,
            None => true,
        };
        if too_deep {
            label = pinned.into();
            confidence = confidence.max(PATTERN_WEIGHT);
        }
    }

    // Headings are short by construction; the cap never overrides a pattern.
    if pin.is_none() && label.is_heading() && line.word_count() > config.max_heading_words {
        label = Label::Body;
        confidence = body;
    }

    ClassifiedLine {
        line: line.clone(),
        label,
        confidence,
    }
}

/// Classify every line of a document.
///
/// Lines are independent, so they are scored in parallel; the output order
/// matches the input reading order exactly.
pub fn classify_lines(
    lines: &[Line],
    profile: &DocumentProfile,
    config: &ClassifierConfig,
) -> Vec<ClassifiedLine> {
    lines
        .par_iter()
        .map(|line| classify_line(line, profile, config))
        .collect()
}
