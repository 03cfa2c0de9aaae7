//! Selection state and its command mutators
//!
//! Three interaction surfaces (a date dropdown, a date button list, and the
//! two range boundary inputs) all write into this one state. Invariants:
//! - Single mode: the active date is set and both range bounds mirror it,
//!   so switching to range mode never loses context
//! - Range mode: no active date; when both bounds are set, start ≤ end,
//!   enforced by clamping the other boundary on edit rather than rejecting
//!   the input. The boundary the user just edited always wins.
//! - A `None` bound means unbounded on that side, not "filter to nothing"

use chrono::NaiveDate;
use paperdeck_common::DateCatalog;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the user is browsing one date or a date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    Range,
}

/// A user event, decoupled from whatever surface delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectDate(NaiveDate),
    EnterRange,
    SetRangeStart(Option<NaiveDate>),
    SetRangeEnd(Option<NaiveDate>),
    ClearRange,
    SetSearch(String),
    ToggleLanguage,
}

/// The reconciled user selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub mode: SelectionMode,
    pub active_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Always the trimmed, lower-cased form of the last committed input;
    /// empty means "no filter"
    pub search_text: String,
    /// Show the translated title where one exists
    pub show_translated: bool,
}

impl SelectionState {
    /// Default selection on load: single mode on the newest catalog date.
    /// An empty catalog yields a selection that resolves to nothing.
    pub fn initial(catalog: &DateCatalog) -> Self {
        let latest = catalog.latest();
        Self {
            mode: SelectionMode::Single,
            active_date: latest,
            start_date: latest,
            end_date: latest,
            search_text: String::new(),
            show_translated: true,
        }
    }

    /// Apply one command, fully replacing the selection.
    pub fn apply(&mut self, command: Command, catalog: &DateCatalog) {
        match command {
            Command::SelectDate(date) => self.select_date(date),
            Command::EnterRange => self.enter_range(catalog),
            Command::SetRangeStart(date) => self.set_range_start(date),
            Command::SetRangeEnd(date) => self.set_range_end(date),
            Command::ClearRange => self.clear_range(),
            Command::SetSearch(raw) => self.set_search(&raw),
            Command::ToggleLanguage => self.toggle_language(),
        }
    }

    /// Select one date; range bounds mirror it. A date the catalog does not
    /// list is accepted and simply resolves to an empty selection.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.mode = SelectionMode::Single;
        self.active_date = Some(date);
        self.start_date = Some(date);
        self.end_date = Some(date);
        debug!(date = %date, "select_date");
    }

    /// Switch to range mode. Unset bounds are defaulted to the newest
    /// catalog date so that entering range mode never triggers an
    /// unbounded load of every dataset. A freshly defaulted bound yields
    /// to a bound the user has set, so start ≤ end holds afterwards.
    pub fn enter_range(&mut self, catalog: &DateCatalog) {
        self.mode = SelectionMode::Range;
        self.active_date = None;
        if let Some(latest) = catalog.latest() {
            let defaulted_start = self.start_date.is_none();
            if defaulted_start {
                self.start_date = Some(latest);
            }
            if self.end_date.is_none() {
                self.end_date = Some(latest);
            }
            if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
                if start > end {
                    if defaulted_start {
                        self.start_date = Some(end);
                    } else {
                        self.end_date = Some(start);
                    }
                }
            }
        }
        debug!(start = ?self.start_date, end = ?self.end_date, "enter_custom_range");
    }

    /// Set the lower bound; if it passes the upper bound, the upper bound
    /// is raised to match. Forces range mode.
    pub fn set_range_start(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                self.end_date = Some(start);
            }
        }
        self.mode = SelectionMode::Range;
        self.active_date = None;
        debug!(start = ?self.start_date, end = ?self.end_date, "update_range_start");
    }

    /// Set the upper bound; if it drops below the lower bound, the lower
    /// bound is pulled down to match. Forces range mode.
    pub fn set_range_end(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                self.start_date = Some(end);
            }
        }
        self.mode = SelectionMode::Range;
        self.active_date = None;
        debug!(start = ?self.start_date, end = ?self.end_date, "update_range_end");
    }

    /// Drop both bounds: range mode, unbounded on both sides.
    pub fn clear_range(&mut self) {
        self.start_date = None;
        self.end_date = None;
        self.mode = SelectionMode::Range;
        self.active_date = None;
        debug!("clear_range");
    }

    /// Store the trimmed, lower-cased search text; empty clears filtering.
    pub fn set_search(&mut self, raw: &str) {
        self.search_text = raw.trim().to_lowercase();
        debug!(keyword = %self.search_text, mode = ?self.mode, "search");
    }

    /// Flip the display language. Affects rendering only.
    pub fn toggle_language(&mut self) {
        self.show_translated = !self.show_translated;
        debug!(show_translated = self.show_translated, "toggle_language");
    }
}
