//! Free-text filter over merged paper collections
//!
//! A linear substring scan, nothing more: no tokenization, no ranking,
//! no stemming. Empty search text is the identity.

use paperdeck_common::MergedPaper;

/// Keep the papers whose searchable text contains `search_text`.
///
/// `search_text` is expected pre-folded (trimmed, lower-cased) by the
/// selection state. Relative order of survivors is stable with respect to
/// the merged input order: resolved-date order, then per-date order.
pub fn filter_papers(papers: Vec<MergedPaper>, search_text: &str) -> Vec<MergedPaper> {
    if search_text.is_empty() {
        return papers;
    }
    papers
        .into_iter()
        .filter(|merged| haystack(merged).contains(search_text))
        .collect()
}

/// The case-folded concatenation of every searchable paper field.
fn haystack(merged: &MergedPaper) -> String {
    let paper = &merged.paper;
    [
        paper.title.as_str(),
        paper.title_zh.as_deref().unwrap_or(""),
        paper.authors.as_str(),
        paper.subjects.as_str(),
        paper.subject_split.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}
