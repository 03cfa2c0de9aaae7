//! Published view states
//!
//! The coordinator publishes exactly one of these per committed render
//! cycle; the view layer renders whatever is current and never sees
//! partial results.

use crate::selection::SelectionMode;
use chrono::NaiveDate;
use paperdeck_common::MergedPaper;
use std::fmt;

/// What the view should currently display.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// No render cycle has run yet
    #[default]
    Idle,
    /// A render cycle is in flight; show the loading placeholder
    Loading,
    /// A render cycle committed. An empty paper list with a summary means
    /// "nothing matched the search"; an empty list without one means the
    /// selection itself covered no dates.
    Rendered(RenderedView),
    /// A dataset fetch failed; everything fetched for that cycle was
    /// discarded and the paper count is zero
    Failed { message: String },
}

/// The committed output of one successful render cycle.
#[derive(Debug, Clone)]
pub struct RenderedView {
    /// Filtered papers, in resolved-date order then per-date order
    pub papers: Vec<MergedPaper>,
    /// Count of papers after filtering
    pub total: usize,
    /// Human-readable selection summary; absent for an empty selection
    pub summary: Option<SelectionSummary>,
    /// Title language preference at commit time
    pub show_translated: bool,
}

/// Summary line for the current selection: mode, effective bounds, and
/// how many catalog dates the selection covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub mode: SelectionMode,
    pub active_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub dates_covered: usize,
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        match (self.mode, self.active_date) {
            (SelectionMode::Single, Some(date)) => parts.push(format!("mode: {date}")),
            (SelectionMode::Single, None) => parts.push("mode: single".to_string()),
            (SelectionMode::Range, _) => parts.push("mode: custom range".to_string()),
        }
        if let Some(start) = self.start_date {
            parts.push(format!("start >= {start}"));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("end <= {end}"));
        }
        if self.dates_covered > 0 {
            parts.push(format!("covers {} dates", self.dates_covered));
        }
        write!(f, "{}", parts.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_mode_summary() {
        let summary = SelectionSummary {
            mode: SelectionMode::Single,
            active_date: Some(date("2024-05-03")),
            start_date: Some(date("2024-05-03")),
            end_date: Some(date("2024-05-03")),
            dates_covered: 1,
        };
        assert_eq!(
            summary.to_string(),
            "mode: 2024-05-03 | start >= 2024-05-03 | end <= 2024-05-03 | covers 1 dates"
        );
    }

    #[test]
    fn test_unbounded_range_summary_omits_bounds() {
        let summary = SelectionSummary {
            mode: SelectionMode::Range,
            active_date: None,
            start_date: None,
            end_date: None,
            dates_covered: 3,
        };
        assert_eq!(summary.to_string(), "mode: custom range | covers 3 dates");
    }
}
