//! Labelled-line rules used by the pattern strategy.
//!
//! Every rule is a standalone function returning the matched text, so the
//! extractor can chain them and each one can be tested on its own.

use lazy_static::lazy_static;
use regex::Regex;

pub const ADVISOR_LABEL: &str = "Advisor:";

lazy_static! {
    /// Two capitalized words at the start of a line, e.g. a speaker name
    static ref TITLE_RE: Regex =
        Regex::new(r"(?m)^[A-Z][a-z]+ [A-Z][a-z]+").expect("title pattern is valid");
    static ref DATE_RE: Regex =
        Regex::new(r"Date:\s*([A-Za-z]+,\s*[A-Za-z]+\s*\d{1,2},\s*\d{4})")
            .expect("date pattern is valid");
    /// Label value on its own line plus the following line
    static ref TIME_LINE_RE: Regex =
        Regex::new(r"Time:[ \t]*([^\r\n]*)(?:\r?\n([^\r\n]*))?").expect("time pattern is valid");
    /// Clock token at the start of the time value; AM/PM only as a whole word
    static ref CLOCK_TOKEN_RE: Regex =
        Regex::new(r"^\d{1,2}:\d{2}(?:[ \t]*(?i:[ap]m)\b)?").expect("clock token pattern is valid");
    static ref LOCATION_RE: Regex =
        Regex::new(r"Location:[ \t]*([^\r\n]*)(?:\r?\n([^\r\n]*))?").expect("location pattern is valid");
    /// A line that opens another "Label:"
    static ref LABEL_LINE_RE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z ]*:").expect("label line pattern is valid");
}

/// First line that opens with "Capitalized Capitalized"
pub fn title_line(text: &str) -> Option<&str> {
    TITLE_RE.find(text).map(|m| m.as_str().trim())
}

/// Everything after the first "Advisor:" label
pub fn advisor_summary(text: &str) -> Option<&str> {
    text.find(ADVISOR_LABEL)
        .map(|idx| text[idx + ADVISOR_LABEL.len()..].trim())
}

/// Everything after the first occurrence of the title
pub fn summary_after_title<'a>(text: &'a str, title: &str) -> Option<&'a str> {
    text.find(title).map(|idx| text[idx + title.len()..].trim())
}

/// Value of a "Date:" label written as "Weekday, Month Day, Year"
pub fn labeled_date(text: &str) -> Option<&str> {
    DATE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Text after a label, or the next line when the label line is empty.
///
/// The next line is skipped when it starts another label.
fn label_value<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    let caps = re.captures(text)?;
    let same_line = caps.get(1).map_or("", |m| m.as_str().trim());
    if !same_line.is_empty() {
        return Some(same_line);
    }

    caps.get(2)
        .map(|m| m.as_str().trim())
        .filter(|next| !next.is_empty() && !LABEL_LINE_RE.is_match(next))
}

/// Value of a "Time:" label.
///
/// Only the leading clock token is kept ("2:00 pm PST" gives "2:00 pm").
/// When there is no clock token, the whole value is returned so that a
/// malformed time still reaches the strict parser and gets reported.
pub fn labeled_time(text: &str) -> Option<&str> {
    let value = label_value(&TIME_LINE_RE, text)?;

    CLOCK_TOKEN_RE
        .find(value)
        .map(|m| m.as_str().trim())
        .or(Some(value))
}

/// Value of a "Location:" label
pub fn labeled_location(text: &str) -> Option<&str> {
    label_value(&LOCATION_RE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOUNCEMENT: &str = "Jane Doe\nAdvisor: Dr. Smith\nDate: Monday, March 3, 2025\nTime: 2:00 pm\nLocation: Room 101";

    #[test]
    fn test_title_line() {
        assert_eq!(title_line(ANNOUNCEMENT), Some("Jane Doe"));
        assert_eq!(title_line("seminar\nJohn Smith presents"), Some("John Smith"));
        assert_eq!(title_line("all lower case\nDate: x"), None);
    }

    #[test]
    fn test_summaries() {
        assert_eq!(
            advisor_summary(ANNOUNCEMENT).map(|s| s.starts_with("Dr. Smith")),
            Some(true)
        );
        assert_eq!(advisor_summary("Jane Doe\nNo label"), None);

        assert_eq!(
            summary_after_title("Jane Doe\n  A talk on compilers  ", "Jane Doe"),
            Some("A talk on compilers")
        );
        assert_eq!(summary_after_title("text", "Jane Doe"), None);
    }

    #[test]
    fn test_labeled_date() {
        assert_eq!(labeled_date(ANNOUNCEMENT), Some("Monday, March 3, 2025"));
        assert_eq!(labeled_date("Date: 2025-03-03"), None);
        assert_eq!(labeled_date("no label"), None);
    }

    #[test]
    fn test_labeled_time() {
        assert_eq!(labeled_time(ANNOUNCEMENT), Some("2:00 pm"));
        assert_eq!(labeled_time("Time: 2:00 PM - 3:00 PM"), Some("2:00 PM"));
        assert_eq!(labeled_time("Time: sometime soon"), Some("sometime soon"));
        assert_eq!(labeled_time("Time:\nLocation: Hall"), None);
        assert_eq!(labeled_time("Time:\n  2:00 pm\nLocation: Hall"), Some("2:00 pm"));
        assert_eq!(labeled_time("no label"), None);
    }

    #[test]
    fn test_labeled_time_ignores_zone_suffix() {
        assert_eq!(labeled_time("Time: 2:00 pm PST"), Some("2:00 pm"));
        assert_eq!(labeled_time("Time: 2:00 PM Mountain"), Some("2:00 PM"));
        assert_eq!(labeled_time("Time: 2:00pm (Pacific)"), Some("2:00pm"));
        assert_eq!(labeled_time("Time: 2:00 AMERICA"), Some("2:00"));
    }

    #[test]
    fn test_labeled_location() {
        assert_eq!(labeled_location(ANNOUNCEMENT), Some("Room 101"));
        assert_eq!(labeled_location("Location:   \n\nNext"), None);
        assert_eq!(labeled_location("Location:\nRoom 101"), Some("Room 101"));
        assert_eq!(labeled_location("Location:\nTime: 2:00 pm"), None);
        assert_eq!(labeled_location("nowhere"), None);
    }
}
