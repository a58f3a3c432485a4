//! Parsing of metadata timestamp strings.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

/// Trailing `Z` or `+HH:MM` style offset following a clock time
static OFFSET_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)\s*(?:[Zz]|[+-]\d{2}:?\d{2})$")
        .expect("offset pattern is valid")
});

/// Parse a date or date-time in any of the common ISO-like or month-name
/// layouts. A time-zone suffix is accepted and discarded. Date-only input
/// resolves to midnight.
pub fn parse_permissive(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let text = OFFSET_SUFFIX
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str());

    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

const DATE_PREFIX_LEN: usize = "YYYY:MM:DD".len();

/// Parse a raw metadata timestamp of the form `YYYY:MM:DD[ HH:MM:SS[tz]]`.
///
/// Returns `None` for empty input, input without any `:`, and anything the
/// permissive parser rejects (e.g. the `0000:00:00 00:00:00` placeholder
/// some cameras write).
///
/// A `-` after the date portion (up to the first space, or the leading
/// `YYYY:MM:DD` when there is no time) cuts the string at that point, which
/// drops negative UTC offsets such as `-05:00`.
pub fn parse_metadata_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.contains(':') {
        return None;
    }

    let date_end = raw.find(' ').unwrap_or_else(|| {
        raw.char_indices()
            .nth(DATE_PREFIX_LEN)
            .map_or(raw.len(), |(i, _)| i)
    });
    let raw = match raw[date_end..].find('-') {
        Some(offset) => &raw[..date_end + offset],
        None => raw,
    };

    let (date_token, time_token) = match raw.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (raw, None),
    };

    let date = date_token.replace(':', "-");
    let combined = match time_token {
        Some(time) if !time.is_empty() => format!("{} {}", date, time),
        _ => date,
    };

    parse_permissive(&combined)
}
