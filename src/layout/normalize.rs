//! Fragment normalization: raw positioned runs to reading-order lines.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::model::{Line, PageFragments, TextFragment};

/// Fraction of the smaller fragment height that two fragments must overlap
/// vertically to be considered part of the same visual row.
const ROW_OVERLAP: f32 = 0.3;

/// Horizontal tolerance (relative to font size) under which a repeated
/// identical fragment is treated as a stroke/fill duplicate.
const DUPLICATE_X_TOLERANCE: f32 = 1.0;

/// Merge each page's fragments into lines and return the whole document as
/// one reading-order sequence: pages ascending, top-to-bottom, left-to-right.
///
/// Degenerate fragments (empty text, zero-area box) are dropped, identical
/// fragments repeated at the same position are collapsed to one occurrence,
/// and lines that are empty after trimming are discarded.
pub fn normalize_pages(pages: &[PageFragments]) -> Vec<Line> {
    let mut lines = Vec::new();
    for page in pages {
        normalize_page(page, &mut lines);
    }
    lines
}

fn normalize_page(page: &PageFragments, out: &mut Vec<Line>) {
    let mut frags: Vec<&TextFragment> = page
        .fragments
        .iter()
        .filter(|f| !f.is_degenerate())
        .collect();

    if frags.is_empty() {
        return;
    }

    // Reading order: top edge first (PDF y grows upward), then left edge.
    frags.sort_by(|a, b| {
        b.y1.partial_cmp(&a.y1)
            .unwrap_or(Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    });

    let mut row: Vec<&TextFragment> = Vec::new();
    let mut row_y0 = 0.0f32;
    let mut row_y1 = 0.0f32;

    for frag in frags {
        if row.is_empty() {
            row_y0 = frag.y0;
            row_y1 = frag.y1;
            row.push(frag);
            continue;
        }

        let overlap = row_y1.min(frag.y1) - row_y0.max(frag.y0);
        let threshold = ROW_OVERLAP * (row_y1 - row_y0).min(frag.height());
        if overlap > threshold {
            row_y0 = row_y0.min(frag.y0);
            row_y1 = row_y1.max(frag.y1);
            row.push(frag);
        } else {
            flush_row(&mut row, page, out);
            row_y0 = frag.y0;
            row_y1 = frag.y1;
            row.push(frag);
        }
    }
    flush_row(&mut row, page, out);
}

/// Turn the accumulated row fragments into a single [`Line`].
fn flush_row(row: &mut Vec<&TextFragment>, page: &PageFragments, out: &mut Vec<Line>) {
    if row.is_empty() {
        return;
    }

    row.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal));

    let mut parts: Vec<&str> = Vec::with_capacity(row.len());
    let mut font_size = 0.0f32;
    let mut bold = false;
    let mut italic = false;
    let mut top = f32::MIN;
    let mut x = f32::MAX;

    let mut prev: Option<&TextFragment> = None;
    for frag in row.drain(..) {
        // Stroke/fill duplication: the decoder emits the same text twice at
        // the same position.
        if let Some(p) = prev {
            if p.text == frag.text && (p.x0 - frag.x0).abs() < DUPLICATE_X_TOLERANCE {
                continue;
            }
        }
        parts.push(frag.text.as_str());
        font_size = font_size.max(frag.font_size);
        bold |= frag.bold;
        italic |= frag.italic;
        top = top.max(frag.y1);
        x = x.min(frag.x0);
        prev = Some(frag);
    }

    let text = collapse_whitespace(&parts.join(" "));
    if text.is_empty() || text.chars().all(|c| c.is_whitespace() || c.is_control()) {
        return;
    }

    let y_frac = if page.height > 0.0 {
        (1.0 - top / page.height).clamp(0.0, 1.0)
    } else {
        0.0
    };

    out.push(Line {
        page: page.page,
        text,
        font_size,
        bold,
        italic,
        y_frac,
        x,
    });
}

/// NFKC-normalize and collapse runs of whitespace to single spaces.
fn collapse_whitespace(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}
