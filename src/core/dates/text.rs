//! Date extraction from directory and file names.

use super::parser::parse_permissive;
use chrono::{NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static SEPARATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[-_](\d{2})[-_](\d{2})").expect("separated date pattern is valid")
});

static COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})").expect("compact date pattern is valid"));

static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]+)\s+(\d{1,2}),?\s+(\d{4})").expect("month name pattern is valid")
});

/// A strategy for finding a calendar date inside free text.
///
/// Strategies are tried in [`DatePattern::ORDERED`] order and the first one
/// that yields a date wins. Only the first regex match of each strategy is
/// considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `YYYY-MM-DD` or `YYYY_MM_DD`
    Separated,
    /// `YYYYMMDD`
    Compact,
    /// `May 14, 2023`
    MonthName,
}

impl DatePattern {
    /// Priority order used by [`extract_date`]
    pub const ORDERED: [DatePattern; 3] = [
        DatePattern::Separated,
        DatePattern::Compact,
        DatePattern::MonthName,
    ];

    /// Try this strategy against `text`.
    ///
    /// Numeric strategies build the date from the captured digits, so an
    /// impossible value such as month 13 yields `None`. The month-name
    /// strategy only uses the match as a trigger and then parses the whole
    /// of `text`; any surrounding words make that parse fail.
    pub fn extract(&self, text: &str) -> Option<NaiveDateTime> {
        match self {
            DatePattern::Separated => SEPARATED.captures(text).and_then(|c| date_from_digits(&c)),
            DatePattern::Compact => COMPACT.captures(text).and_then(|c| date_from_digits(&c)),
            DatePattern::MonthName => {
                if MONTH_NAME.is_match(text) {
                    parse_permissive(text)
                } else {
                    None
                }
            }
        }
    }
}

fn date_from_digits(captures: &Captures<'_>) -> Option<NaiveDateTime> {
    let year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u32 = captures.get(2)?.as_str().parse().ok()?;
    let day: u32 = captures.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Find the first date embedded in `text` (a path or path component).
///
/// The time of day is always midnight.
pub fn extract_date(text: &str) -> Option<NaiveDateTime> {
    DatePattern::ORDERED
        .iter()
        .find_map(|pattern| pattern.extract(text))
}
