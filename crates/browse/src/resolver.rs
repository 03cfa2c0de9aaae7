//! Selection resolution
//!
//! Pure mapping from a selection to the ordered set of catalog dates it
//! requires loading. Output always follows catalog order (newest first).

use crate::selection::{SelectionMode, SelectionState};
use paperdeck_common::{DateCatalog, DateEntry};

/// Compute which catalog entries the selection covers.
///
/// Single mode yields the entry matching the active date, or nothing when
/// the catalog does not list it. Range mode yields every entry inside
/// `[start, end]` inclusive, with a `None` bound treated as unbounded on
/// that side. Date comparison is calendar comparison via `NaiveDate`
/// ordering, never string collation. An empty catalog resolves to the
/// empty sequence unconditionally.
pub fn resolve(state: &SelectionState, catalog: &DateCatalog) -> Vec<DateEntry> {
    match state.mode {
        SelectionMode::Single => catalog
            .dates
            .iter()
            .filter(|entry| Some(entry.date) == state.active_date)
            .copied()
            .collect(),
        SelectionMode::Range => catalog
            .dates
            .iter()
            .filter(|entry| within_bounds(entry.date, state.start_date, state.end_date))
            .copied()
            .collect(),
    }
}

fn within_bounds(
    date: chrono::NaiveDate,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Command;
    use chrono::NaiveDate;
    use paperdeck_common::DateEntry;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn catalog() -> DateCatalog {
        DateCatalog {
            dates: vec![
                DateEntry { date: date("2024-05-03"), count: 2 },
                DateEntry { date: date("2024-05-02"), count: 1 },
                DateEntry { date: date("2024-05-01"), count: 3 },
            ],
        }
    }

    #[test]
    fn test_single_mode_matches_one_entry() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::SelectDate(date("2024-05-02")), &cat);

        let resolved = resolve(&state, &cat);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].date, date("2024-05-02"));
        assert_eq!(resolved[0].count, 1);
    }

    #[test]
    fn test_unknown_date_resolves_empty() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::SelectDate(date("2024-04-30")), &cat);

        assert!(resolve(&state, &cat).is_empty());
    }

    #[test]
    fn test_range_is_inclusive_and_catalog_ordered() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::EnterRange, &cat);
        state.apply(Command::SetRangeStart(Some(date("2024-05-01"))), &cat);
        state.apply(Command::SetRangeEnd(Some(date("2024-05-02"))), &cat);

        let resolved = resolve(&state, &cat);
        let dates: Vec<_> = resolved.iter().map(|entry| entry.date).collect();
        assert_eq!(dates, vec![date("2024-05-02"), date("2024-05-01")]);
        assert_eq!(resolved.iter().map(|entry| entry.count).sum::<u32>(), 4);
    }

    #[test]
    fn test_null_bounds_are_unbounded() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::ClearRange, &cat);
        assert_eq!(resolve(&state, &cat).len(), 3);

        state.apply(Command::SetRangeEnd(Some(date("2024-05-02"))), &cat);
        state.start_date = None;
        let dates: Vec<_> = resolve(&state, &cat).iter().map(|entry| entry.date).collect();
        assert_eq!(dates, vec![date("2024-05-02"), date("2024-05-01")]);
    }

    #[test]
    fn test_range_outside_catalog_is_empty_not_error() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::SetRangeStart(Some(date("2024-06-01"))), &cat);
        state.apply(Command::SetRangeEnd(Some(date("2024-06-30"))), &cat);

        assert!(resolve(&state, &cat).is_empty());
    }

    #[test]
    fn test_empty_catalog_resolves_empty() {
        let cat = DateCatalog::default();
        let state = SelectionState::initial(&cat);
        assert!(resolve(&state, &cat).is_empty());
    }

    #[test]
    fn test_cross_year_comparison_is_chronological() {
        let cat = DateCatalog {
            dates: vec![
                DateEntry { date: date("2025-01-02"), count: 1 },
                DateEntry { date: date("2024-12-31"), count: 1 },
            ],
        };
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::SetRangeStart(Some(date("2024-12-31"))), &cat);
        state.apply(Command::SetRangeEnd(Some(date("2025-01-02"))), &cat);

        assert_eq!(resolve(&state, &cat).len(), 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let cat = catalog();
        let mut state = SelectionState::initial(&cat);
        state.apply(Command::SetRangeStart(Some(date("2024-05-01"))), &cat);

        let first = resolve(&state, &cat);
        let second = resolve(&state, &cat);
        assert_eq!(first, second);
    }
}
