//! Time-of-day strings.
//!
//! Every `H:MM AM/PM` string in the application goes through [`parse_time_to_minutes`];
//! there is exactly one grammar:
//!
//! - hour: one or two digits, `1..=12`
//! - minute: exactly two digits, `00..=59`
//! - meridiem: `AM` or `PM`, case-insensitive, optionally preceded by whitespace
//!
//! Times are carried around as minute offsets from midnight (`u32`).

use thiserror::Error;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Why a time or period string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time string is empty")]
    Empty,
    #[error("missing ':' between hour and minute in {0:?}")]
    MissingSeparator(String),
    #[error("invalid hour in {0:?}")]
    InvalidHour(String),
    #[error("invalid minute in {0:?}")]
    InvalidMinute(String),
    #[error("missing or invalid AM/PM suffix in {0:?}")]
    InvalidMeridiem(String),
    #[error("period {0:?} is not of the form 'start - end'")]
    MissingRangeSeparator(String),
    #[error("period {0:?} ends before it starts")]
    EndBeforeStart(String),
}

/// Format an hour (`0..=23`) and minute as a 12-hour display string.
///
/// Hour 0 and hour 12 both display as 12; the minute is zero-padded.
///
/// ```
/// use room_scheduler::utils::time::format_time;
/// assert_eq!(format_time(0, 0), "12:00 AM");
/// assert_eq!(format_time(13, 30), "1:30 PM");
/// ```
pub fn format_time(hour: u32, minute: u32) -> String {
    let hour = hour % 24;
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", display_hour, minute, meridiem)
}

/// Format a minute offset from midnight as a 12-hour display string.
pub fn format_minutes(minutes: u32) -> String {
    format_time(minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Parse an `H:MM AM/PM` string into minutes since midnight.
pub fn parse_time_to_minutes(input: &str) -> Result<u32, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let (clock, is_pm) = split_meridiem(trimmed)?;
    let (hour_text, minute_text) = clock
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingSeparator(trimmed.to_string()))?;

    if hour_text.is_empty() || hour_text.len() > 2 || !is_all_digits(hour_text) {
        return Err(TimeParseError::InvalidHour(trimmed.to_string()));
    }
    if minute_text.len() != 2 || !is_all_digits(minute_text) {
        return Err(TimeParseError::InvalidMinute(trimmed.to_string()));
    }

    let hour: u32 = hour_text
        .parse()
        .map_err(|_| TimeParseError::InvalidHour(trimmed.to_string()))?;
    let minute: u32 = minute_text
        .parse()
        .map_err(|_| TimeParseError::InvalidMinute(trimmed.to_string()))?;

    if !(1..=12).contains(&hour) {
        return Err(TimeParseError::InvalidHour(trimmed.to_string()));
    }
    if minute >= MINUTES_PER_HOUR {
        return Err(TimeParseError::InvalidMinute(trimmed.to_string()));
    }

    let hour24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    Ok(hour24 * MINUTES_PER_HOUR + minute)
}

/// Render minutes since midnight as a 24-hour `HH:MM` string, the form the backend expects.
pub fn minutes_to_24h(minutes: u32) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Parse the backend's 24-hour `HH:MM` form back into minutes since midnight.
pub fn parse_24h_to_minutes(input: &str) -> Result<u32, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    let (hour_text, minute_text) = trimmed
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingSeparator(trimmed.to_string()))?;
    let hour: u32 = hour_text
        .parse()
        .ok()
        .filter(|h| *h < 24 && is_all_digits(hour_text))
        .ok_or_else(|| TimeParseError::InvalidHour(trimmed.to_string()))?;
    let minute: u32 = minute_text
        .parse()
        .ok()
        .filter(|m| *m < MINUTES_PER_HOUR && minute_text.len() == 2 && is_all_digits(minute_text))
        .ok_or_else(|| TimeParseError::InvalidMinute(trimmed.to_string()))?;

    Ok(hour * MINUTES_PER_HOUR + minute)
}

/// Convert a display string such as `"9:00 AM"` to `"09:00"`.
pub fn display_to_24h(display: &str) -> Result<String, TimeParseError> {
    parse_time_to_minutes(display).map(minutes_to_24h)
}

fn split_meridiem(input: &str) -> Result<(&str, bool), TimeParseError> {
    let invalid = || TimeParseError::InvalidMeridiem(input.to_string());

    let split_at = input.len().checked_sub(2).ok_or_else(invalid)?;
    let suffix = input.get(split_at..).ok_or_else(invalid)?;
    let clock = input.get(..split_at).ok_or_else(invalid)?.trim_end();

    if suffix.eq_ignore_ascii_case("AM") {
        Ok((clock, false))
    } else if suffix.eq_ignore_ascii_case("PM") {
        Ok((clock, true))
    } else {
        Err(invalid())
    }
}

fn is_all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 0, "12:00 AM")]
    #[test_case(7, 0, "7:00 AM")]
    #[test_case(11, 30, "11:30 AM")]
    #[test_case(12, 0, "12:00 PM")]
    #[test_case(13, 5, "1:05 PM")]
    #[test_case(23, 30, "11:30 PM")]
    fn test_format_time(hour: u32, minute: u32, expected: &str) {
        assert_eq!(format_time(hour, minute), expected);
    }

    #[test_case("7:00 AM", 420)]
    #[test_case("07:00 AM", 420)]
    #[test_case("12:00 AM", 0)]
    #[test_case("12:30 PM", 750)]
    #[test_case("8:30 pm", 1230)]
    #[test_case("9:15PM", 1275)]
    #[test_case("  10:45 Am  ", 645)]
    fn test_parse_valid_times(input: &str, expected: u32) {
        assert_eq!(parse_time_to_minutes(input), Ok(expected));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_time_to_minutes(""), Err(TimeParseError::Empty));
        assert!(matches!(
            parse_time_to_minutes("7 AM"),
            Err(TimeParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("7:0 AM"),
            Err(TimeParseError::InvalidMinute(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("7:60 AM"),
            Err(TimeParseError::InvalidMinute(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("13:00 PM"),
            Err(TimeParseError::InvalidHour(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("0:30 AM"),
            Err(TimeParseError::InvalidHour(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("123:00 AM"),
            Err(TimeParseError::InvalidHour(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("09:00"),
            Err(TimeParseError::InvalidMeridiem(_))
        ));
        assert!(matches!(
            parse_time_to_minutes("9:00 XM"),
            Err(TimeParseError::InvalidMeridiem(_))
        ));
    }

    #[test]
    fn test_display_to_24h() {
        assert_eq!(display_to_24h("9:00 AM").as_deref(), Ok("09:00"));
        assert_eq!(display_to_24h("1:30 PM").as_deref(), Ok("13:30"));
        assert_eq!(display_to_24h("12:00 AM").as_deref(), Ok("00:00"));
        assert!(display_to_24h("noon").is_err());
    }

    #[test]
    fn test_parse_24h() {
        assert_eq!(parse_24h_to_minutes("09:00"), Ok(540));
        assert_eq!(parse_24h_to_minutes("13:30"), Ok(810));
        assert!(parse_24h_to_minutes("24:00").is_err());
        assert!(parse_24h_to_minutes("9:5").is_err());
        assert!(parse_24h_to_minutes("+9:00").is_err());
    }

    #[test]
    fn test_format_minutes_matches_format_time() {
        assert_eq!(format_minutes(1230), "8:30 PM");
        assert_eq!(format_minutes(420), format_time(7, 0));
    }
}
