//! Date label formatting and calendar window helpers.
//!
//! Labels use moment-style patterns (`DD/MM/YYYY`, `dddd, MMMM Do`, ...).
//! Two failure modes are kept apart:
//!
//! * a missing or wrong-typed value is a hard [`DateFormatError`];
//! * a well-typed value that does not describe a real instant renders as
//!   [`INVALID_DATE_LABEL`].

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};
use serde_json::Value;
use thiserror::Error;

/// Pattern used when the caller does not supply one
pub const DEFAULT_LABEL_PATTERN: &str = "DD/MM/YYYY";

/// Label rendered for a value that parses as a date type but is not a real instant
pub const INVALID_DATE_LABEL: &str = "Invalid date";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("no date value was supplied")]
    Missing,
    #[error("expected a date string or epoch milliseconds, got {0}")]
    WrongType(&'static str),
    #[error("invalid date pattern '{0}'")]
    Pattern(String),
}

/// A point in time to be labelled, or an explicit "unparseable date" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelInstant {
    Valid(NaiveDateTime),
    Invalid,
}

impl LabelInstant {
    /// Parse a date string. Anything that is not a recognised date becomes `Invalid`.
    ///
    /// RFC 3339 values keep the wall-clock time of their own offset.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return LabelInstant::Valid(dt.naive_local());
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
                return LabelInstant::Valid(dt);
            }
        }

        match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            Ok(date) => LabelInstant::Valid(date.and_time(NaiveTime::MIN)),
            Err(_) => LabelInstant::Invalid,
        }
    }

    /// Interpret Unix epoch milliseconds (UTC)
    pub fn from_epoch_millis(millis: i64) -> Self {
        match DateTime::from_timestamp_millis(millis) {
            Some(dt) => LabelInstant::Valid(dt.naive_utc()),
            None => LabelInstant::Invalid,
        }
    }
}

impl From<NaiveDateTime> for LabelInstant {
    fn from(value: NaiveDateTime) -> Self {
        LabelInstant::Valid(value)
    }
}

impl From<NaiveDate> for LabelInstant {
    fn from(value: NaiveDate) -> Self {
        LabelInstant::Valid(value.and_time(NaiveTime::MIN))
    }
}

/// Format an instant with `pattern`, or [`DEFAULT_LABEL_PATTERN`] when `None`.
pub fn format_label(instant: &LabelInstant, pattern: Option<&str>) -> String {
    match instant {
        LabelInstant::Valid(dt) => render(dt, pattern.unwrap_or(DEFAULT_LABEL_PATTERN)),
        LabelInstant::Invalid => INVALID_DATE_LABEL.to_string(),
    }
}

/// Format a dynamically typed value, e.g. a field of a JSON response.
///
/// Strings are parsed as dates, integers are epoch milliseconds. `null`,
/// booleans, arrays and objects are rejected.
pub fn format_value(value: Option<&Value>, pattern: Option<&str>) -> Result<String, DateFormatError> {
    let instant = match value {
        None | Some(Value::Null) => return Err(DateFormatError::Missing),
        Some(Value::Bool(_)) => return Err(DateFormatError::WrongType("a boolean")),
        Some(Value::Array(_)) => return Err(DateFormatError::WrongType("an array")),
        Some(Value::Object(_)) => return Err(DateFormatError::WrongType("an object")),
        Some(Value::String(s)) => LabelInstant::parse(s),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(millis) => LabelInstant::from_epoch_millis(millis),
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                    LabelInstant::from_epoch_millis(f.trunc() as i64)
                }
                _ => LabelInstant::Invalid,
            },
        },
    };

    Ok(format_label(&instant, pattern))
}

/// Reject patterns that would never produce a useful label
pub fn validate_pattern(pattern: &str) -> Result<(), DateFormatError> {
    if pattern.trim().is_empty() {
        return Err(DateFormatError::Pattern(pattern.to_string()));
    }

    let mut in_bracket = false;
    for c in pattern.chars() {
        match c {
            '[' if !in_bracket => in_bracket = true,
            ']' if in_bracket => in_bracket = false,
            _ => {}
        }
    }
    if in_bracket {
        return Err(DateFormatError::Pattern(pattern.to_string()));
    }

    let has_field = tokenize(pattern)
        .iter()
        .any(|piece| matches!(piece, Piece::Field(_)));
    if !has_field {
        return Err(DateFormatError::Pattern(pattern.to_string()));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year4,
    Year2,
    MonthName,
    MonthShort,
    Month2,
    Month,
    DayOrdinal,
    Day2,
    Day,
    WeekdayName,
    WeekdayShort,
    Hour24Padded,
    Hour24,
    Hour12Padded,
    Hour12,
    Minute,
    Second,
    MeridiemUpper,
    MeridiemLower,
}

// Longer tokens first so "MMMM" wins over "MM"
const FIELDS: &[(&str, Field)] = &[
    ("YYYY", Field::Year4),
    ("YY", Field::Year2),
    ("MMMM", Field::MonthName),
    ("MMM", Field::MonthShort),
    ("MM", Field::Month2),
    ("M", Field::Month),
    ("Do", Field::DayOrdinal),
    ("DD", Field::Day2),
    ("D", Field::Day),
    ("dddd", Field::WeekdayName),
    ("ddd", Field::WeekdayShort),
    ("HH", Field::Hour24Padded),
    ("H", Field::Hour24),
    ("hh", Field::Hour12Padded),
    ("h", Field::Hour12),
    ("mm", Field::Minute),
    ("ss", Field::Second),
    ("A", Field::MeridiemUpper),
    ("a", Field::MeridiemLower),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Field(Field),
    Literal(&'a str),
}

fn tokenize(pattern: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            // Unterminated brackets are copied through as-is
            match rest[1..].find(']') {
                Some(end) => {
                    pieces.push(Piece::Literal(&rest[1..end + 1]));
                    rest = &rest[end + 2..];
                }
                None => {
                    pieces.push(Piece::Literal(rest));
                    rest = "";
                }
            }
            continue;
        }

        if let Some((token, field)) = FIELDS.iter().find(|(token, _)| rest.starts_with(token)) {
            pieces.push(Piece::Field(*field));
            rest = &rest[token.len()..];
            continue;
        }

        let len = c.len_utf8();
        pieces.push(Piece::Literal(&rest[..len]));
        rest = &rest[len..];
    }

    pieces
}

fn render(dt: &NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);

    for piece in tokenize(pattern) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Field(field) => out.push_str(&render_field(dt, field)),
        }
    }

    out
}

fn render_field(dt: &NaiveDateTime, field: Field) -> String {
    let (is_pm, hour12) = dt.hour12();
    match field {
        Field::Year4 => format!("{:04}", dt.year()),
        Field::Year2 => format!("{:02}", dt.year().rem_euclid(100)),
        Field::MonthName => dt.format("%B").to_string(),
        Field::MonthShort => dt.format("%b").to_string(),
        Field::Month2 => format!("{:02}", dt.month()),
        Field::Month => dt.month().to_string(),
        Field::DayOrdinal => format!("{}{}", dt.day(), ordinal_suffix(dt.day())),
        Field::Day2 => format!("{:02}", dt.day()),
        Field::Day => dt.day().to_string(),
        Field::WeekdayName => dt.format("%A").to_string(),
        Field::WeekdayShort => dt.format("%a").to_string(),
        Field::Hour24Padded => format!("{:02}", dt.hour()),
        Field::Hour24 => dt.hour().to_string(),
        Field::Hour12Padded => format!("{:02}", hour12),
        Field::Hour12 => hour12.to_string(),
        Field::Minute => format!("{:02}", dt.minute()),
        Field::Second => format!("{:02}", dt.second()),
        Field::MeridiemUpper => (if is_pm { "PM" } else { "AM" }).to_string(),
        Field::MeridiemLower => (if is_pm { "pm" } else { "am" }).to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date);
    (first, last)
}
