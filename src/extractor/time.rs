use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, ParseResult};
use lazy_static::lazy_static;
use regex::Regex;

/// Full date as written in announcements, e.g. "Monday, March 3, 2025"
pub const DATE_FORMAT: &str = "%A, %B %d, %Y";
/// Date without the weekday, e.g. "March 3, 2025"
pub const SHORT_DATE_FORMAT: &str = "%B %d, %Y";
/// Date followed by a 12-hour clock time
pub const DATE_TIME_FORMAT: &str = "%A, %B %d, %Y %I:%M %p";
/// 12-hour clock time, e.g. "2:00 pm"
pub const CLOCK_FORMAT: &str = "%I:%M %p";

// H:MM with an optional AM/PM marker
const TIME_TOKEN: &str = r"\d{1,2}:\d{2}(?:\s?[AaPp]\.?[Mm]\.?)?";

lazy_static! {
    static ref TIME_TOKEN_RE: Regex = Regex::new(&format!(r"^\s*({})", TIME_TOKEN))
        .expect("time token pattern is valid");
    static ref TIME_RANGE_RE: Regex = Regex::new(&format!(
        r"^\s*({tok})\s*(?:-|–|—|\bto\b)\s*({tok})",
        tok = TIME_TOKEN
    ))
    .expect("time range pattern is valid");
    static ref MONTH_DAY_YEAR_RE: Regex = Regex::new(
        r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s*\d{4}\b"
    )
    .expect("month day year pattern is valid");
    static ref CLOCK_TIME_RE: Regex = Regex::new(&format!(r"\b{}", TIME_TOKEN))
        .expect("clock time pattern is valid");
}

/// Start and optional end time strings taken from a time expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: Option<String>,
}

/// Parse a combined "date time" string with the strict announcement format
pub fn parse_date_time(input: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), DATE_TIME_FORMAT)
}

/// Parse a date on its own, accepting the full and the weekday-less layout
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, SHORT_DATE_FORMAT))
        .ok()
}

/// Parse a 12-hour clock time. Tokens without an AM/PM marker are rejected.
pub fn parse_clock(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().replace('.', "");
    NaiveTime::parse_from_str(&normalized, CLOCK_FORMAT).ok()
}

/// Split a time expression into start and optional end at a hyphen, dash or "to"
pub fn parse_time_range(expression: &str) -> Option<TimeRange> {
    if let Some(caps) = TIME_RANGE_RE.captures(expression) {
        return Some(TimeRange {
            start: caps[1].trim().to_string(),
            end: Some(caps[2].trim().to_string()),
        });
    }

    TIME_TOKEN_RE.captures(expression).map(|caps| TimeRange {
        start: caps[1].trim().to_string(),
        end: None,
    })
}

/// First "Month Day, Year" expression anywhere in the text
pub fn find_month_day_year(text: &str) -> Option<&str> {
    MONTH_DAY_YEAR_RE.find(text).map(|m| m.as_str())
}

/// First standalone clock token (H:MM with optional AM/PM) in the text
pub fn find_clock_time(text: &str) -> Option<&str> {
    CLOCK_TIME_RE.find(text).map(|m| m.as_str().trim())
}

/// End of an event that only states its start
pub fn default_end(start: NaiveDateTime, duration: Duration) -> Option<NaiveDateTime> {
    start.checked_add_signed(duration)
}

/// An explicit end earlier than `start` belongs to the next day ("10:00 PM - 1:00 AM")
pub fn end_after_start(start: NaiveDateTime, end: NaiveDateTime) -> Option<NaiveDateTime> {
    if end >= start {
        Some(end)
    } else {
        end.checked_add_signed(Duration::days(1))
    }
}
