//! Catalog and paper data model
//!
//! Wire contract for the static JSON files produced by the crawl pipeline:
//! - `index.json` holds the date catalog: `{ "dates": [ {date, count}, ... ] }`
//! - `dates/<date>.json` holds one day's papers: `{ date, papers: [...] }`
//!
//! Paper records round-trip untouched; the only derived field is the
//! originating date attached when datasets are merged across a range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day in the catalog: the date and how many papers it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date: NaiveDate,
    pub count: u32,
}

/// The date index, loaded once at startup and read-only thereafter.
///
/// The source orders entries newest first; that order is authoritative
/// for the default selection and for resolution output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateCatalog {
    pub dates: Vec<DateEntry>,
}

impl DateCatalog {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Most recent date in the catalog (first entry, per source order).
    pub fn latest(&self) -> Option<NaiveDate> {
        self.dates.first().map(|entry| entry.date)
    }

    /// Whether the catalog lists the given date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.iter().any(|entry| entry.date == date)
    }

    /// Total paper count across all listed dates.
    pub fn total_count(&self) -> u64 {
        self.dates.iter().map(|entry| entry.count as u64).sum()
    }
}

/// One paper record as produced by the crawl pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,

    pub title: String,

    /// Translated title, when the pipeline produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_zh: Option<String>,

    pub authors: String,

    pub url: String,

    pub subjects: String,

    /// Comma-separated tag string
    pub subject_split: String,
}

impl Paper {
    /// Tags parsed out of the comma-separated `subject_split` field,
    /// trimmed and with empties dropped.
    pub fn tags(&self) -> Vec<&str> {
        self.subject_split
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Title to display for the given language preference; falls back to
    /// the original title when no translation exists.
    pub fn display_title(&self, show_translated: bool) -> &str {
        if show_translated {
            self.title_zh.as_deref().unwrap_or(&self.title)
        } else {
            &self.title
        }
    }
}

/// Per-date payload fetched lazily, one per distinct date in the selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperDataset {
    pub date: NaiveDate,
    #[serde(default)]
    pub papers: Vec<Paper>,
}

/// A paper annotated with the date of the dataset it was drawn from.
///
/// The annotation is derived at merge time and never persisted; it lets a
/// paper pulled from a multi-date range remember its source date for
/// downstream use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPaper {
    pub paper: Paper,
    pub source_date: NaiveDate,
}
