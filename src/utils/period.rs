//! Period strings (`"H:MM AM - H:MM PM"`) and day tokens (`"MWF"`, `"TTh"`, `"Sat"`).

use chrono::Weekday;

use super::time::{parse_time_to_minutes, TimeParseError, MINUTES_PER_HOUR};

/// Separator between the start and end halves of a period string.
pub const PERIOD_SEPARATOR: &str = " - ";

/// A half-open interval of minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / f64::from(MINUTES_PER_HOUR)
    }

    /// `min(end) - max(start)`; zero or negative when the ranges do not overlap.
    pub fn overlap_minutes(&self, other: &TimeRange) -> i64 {
        i64::from(self.end.min(other.end)) - i64::from(self.start.max(other.start))
    }

    /// Strict positive overlap. Ranges that only touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.overlap_minutes(other) > 0
    }
}

/// Parse a `"start - end"` period into a [`TimeRange`].
pub fn parse_period(period: &str) -> Result<TimeRange, TimeParseError> {
    let (start, end) = period
        .split_once(PERIOD_SEPARATOR)
        .ok_or_else(|| TimeParseError::MissingRangeSeparator(period.to_string()))?;

    let range = TimeRange::new(parse_time_to_minutes(start)?, parse_time_to_minutes(end)?);
    if range.end < range.start {
        return Err(TimeParseError::EndBeforeStart(period.to_string()));
    }

    Ok(range)
}

/// Start of a period, accepting either the range form or a bare start time.
pub fn period_start(period: &str) -> Result<u32, TimeParseError> {
    match period.split_once(PERIOD_SEPARATOR) {
        Some((start, _)) => parse_time_to_minutes(start),
        None => parse_time_to_minutes(period),
    }
}

/// Overlap in minutes between two period strings, `None` if either is malformed.
pub fn overlap_minutes(first: &str, second: &str) -> Option<i64> {
    let first = parse_period(first).ok()?;
    let second = parse_period(second).ok()?;
    Some(first.overlap_minutes(&second))
}

/// Distinct weekdays named in a day string, in order of first appearance.
///
/// Tokens are `M`, `T`, `W`, `Th`, `F`, `Sat` and `Sun`. `Th` wins over `T`,
/// and an `M` directly followed by `h` is not a Monday. Anything else is skipped.
pub fn parse_day_tokens(days: &str) -> Vec<Weekday> {
    let mut found = Vec::new();
    let mut rest = days;

    while let Some(first) = rest.chars().next() {
        let (weekday, consumed) = if rest.starts_with("Sat") {
            (Some(Weekday::Sat), 3)
        } else if rest.starts_with("Sun") {
            (Some(Weekday::Sun), 3)
        } else if rest.starts_with("Th") {
            (Some(Weekday::Thu), 2)
        } else if rest.starts_with('T') {
            (Some(Weekday::Tue), 1)
        } else if rest.starts_with('M') && !rest[1..].starts_with('h') {
            (Some(Weekday::Mon), 1)
        } else if rest.starts_with('W') {
            (Some(Weekday::Wed), 1)
        } else if rest.starts_with('F') {
            (Some(Weekday::Fri), 1)
        } else {
            (None, first.len_utf8())
        };

        if let Some(day) = weekday {
            if !found.contains(&day) {
                found.push(day);
            }
        }
        rest = &rest[consumed..];
    }

    found
}
