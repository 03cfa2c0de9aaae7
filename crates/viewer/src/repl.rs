//! Line-oriented command parsing
//!
//! Maps typed input onto the core's command interface. The parser is the
//! terminal stand-in for the dropdown, the button list, and the two range
//! boundary inputs of the web shell.

use chrono::NaiveDate;
use paperdeck_browse::Command;
use paperdeck_common::{BrowseError, Result};

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Forward a command to the coordinator
    Apply(Command),
    /// List the catalog dates and their paper counts
    ListDates,
    Help,
    Quit,
    /// Blank line; nothing to do
    Noop,
}

/// Parse one input line. `-` for a range boundary means "unbounded".
pub fn parse_line(line: &str) -> Result<ReplAction> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ReplAction::Noop);
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    match verb {
        "date" | "d" => Ok(ReplAction::Apply(Command::SelectDate(parse_date(rest)?))),
        "range" | "r" => Ok(ReplAction::Apply(Command::EnterRange)),
        "start" => Ok(ReplAction::Apply(Command::SetRangeStart(parse_bound(rest)?))),
        "end" => Ok(ReplAction::Apply(Command::SetRangeEnd(parse_bound(rest)?))),
        "clear" => Ok(ReplAction::Apply(Command::ClearRange)),
        // bare `search` clears the filter
        "search" | "s" => Ok(ReplAction::Apply(Command::SetSearch(rest.to_string()))),
        "lang" | "l" => Ok(ReplAction::Apply(Command::ToggleLanguage)),
        "dates" => Ok(ReplAction::ListDates),
        "help" | "?" => Ok(ReplAction::Help),
        "quit" | "exit" | "q" => Ok(ReplAction::Quit),
        other => Err(BrowseError::Configuration {
            message: format!("unknown command '{other}', try 'help'"),
        }),
    }
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    input.parse().map_err(|_| BrowseError::InvalidDate {
        input: input.to_string(),
    })
}

fn parse_bound(input: &str) -> Result<Option<NaiveDate>> {
    if input.is_empty() || input == "-" {
        return Ok(None);
    }
    parse_date(input).map(Some)
}

pub const HELP: &str = "\
commands:
  date <YYYY-MM-DD>    browse a single date
  range                switch to range mode
  start <date|->       set the range start (- for unbounded)
  end <date|->         set the range end (- for unbounded)
  clear                clear both range bounds
  search [text]        filter papers; empty clears the filter
  lang                 toggle original/translated titles
  dates                list available dates
  help                 show this help
  quit                 exit";

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_select_date() {
        assert_eq!(
            parse_line("date 2024-05-03").unwrap(),
            ReplAction::Apply(Command::SelectDate(date("2024-05-03")))
        );
        assert_eq!(
            parse_line("d 2024-05-03").unwrap(),
            ReplAction::Apply(Command::SelectDate(date("2024-05-03")))
        );
    }

    #[test]
    fn test_parse_bounds_and_unbounded() {
        assert_eq!(
            parse_line("start 2024-05-01").unwrap(),
            ReplAction::Apply(Command::SetRangeStart(Some(date("2024-05-01"))))
        );
        assert_eq!(
            parse_line("start -").unwrap(),
            ReplAction::Apply(Command::SetRangeStart(None))
        );
        assert_eq!(
            parse_line("end").unwrap(),
            ReplAction::Apply(Command::SetRangeEnd(None))
        );
    }

    #[test]
    fn test_parse_search_keeps_raw_text() {
        assert_eq!(
            parse_line("search Quantum  Codes").unwrap(),
            ReplAction::Apply(Command::SetSearch("Quantum  Codes".into()))
        );
        // bare search clears the filter
        assert_eq!(
            parse_line("search").unwrap(),
            ReplAction::Apply(Command::SetSearch(String::new()))
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        let err = parse_line("date yesterday").unwrap_err();
        assert!(matches!(err, BrowseError::InvalidDate { .. }));
    }

    #[test]
    fn test_parse_meta_commands() {
        assert_eq!(parse_line("dates").unwrap(), ReplAction::ListDates);
        assert_eq!(parse_line("?").unwrap(), ReplAction::Help);
        assert_eq!(parse_line("quit").unwrap(), ReplAction::Quit);
        assert_eq!(parse_line("   ").unwrap(), ReplAction::Noop);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_line("frobnicate").is_err());
    }
}
