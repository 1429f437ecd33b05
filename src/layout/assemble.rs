//! Outline assembly: from classified lines to the final structure.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::model::{ClassifiedLine, DocumentProfile, Label, Outline, OutlineEntry};

/// Build the outline from the full classified sequence.
///
/// The title is the first Title-labeled line, or the first H1 on page 1 if
/// no line was labeled Title; with neither, the title stays empty. Heading
/// text repeated identically on more than half of the document's pages is a
/// running header or footer and is excluded wholesale. The chosen title line
/// never reappears as an outline entry.
pub fn assemble(classified: &[ClassifiedLine], profile: &DocumentProfile) -> Outline {
    let title_idx = classified
        .iter()
        .position(|c| c.label == Label::Title)
        .or_else(|| {
            classified
                .iter()
                .position(|c| c.label == Label::H1 && c.line.page == 1)
        });
    let title = title_idx
        .map(|i| classified[i].line.text.clone())
        .unwrap_or_default();

    let repeated = repeated_heading_texts(classified, profile.page_count);

    let mut entries = Vec::new();
    for (i, c) in classified.iter().enumerate() {
        if Some(i) == title_idx {
            continue;
        }
        let Some(level) = c.label.heading_level() else {
            continue;
        };
        if repeated.contains(c.line.text.as_str()) {
            log::debug!(
                "dropping repeated header/footer candidate on page {}: {:?}",
                c.line.page,
                c.line.text
            );
            continue;
        }
        entries.push(OutlineEntry {
            level,
            text: c.line.text.clone(),
            page: c.line.page,
        });
    }

    Outline {
        title,
        outline: entries,
    }
}

/// Heading texts that occur on more than half of the document's pages.
///
/// Occurrences are counted per distinct page; a text must appear on at
/// least two pages before it can be considered a running header.
fn repeated_heading_texts<'a>(
    classified: &'a [ClassifiedLine],
    page_count: u32,
) -> HashSet<&'a str> {
    let mut pages_with: HashMap<&str, BTreeSet<u32>> = HashMap::new();
    for c in classified.iter().filter(|c| c.label.is_heading()) {
        pages_with
            .entry(c.line.text.as_str())
            .or_default()
            .insert(c.line.page);
    }

    pages_with
        .into_iter()
        .filter(|(_, pages)| pages.len() > 1 && pages.len() as u32 * 2 > page_count)
        .map(|(text, _)| text)
        .collect()
}
