use super::models::{Frequency, Recurrence};
use chrono::Weekday;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EVERY_RE: Regex =
        Regex::new(r"(?i)\bevery\s+([a-z]+)\b").expect("recurrence pattern is valid");
}

/// Detect an "every week" / "every Wednesday" style repeat rule
pub fn detect_recurrence(text: &str) -> Option<Recurrence> {
    EVERY_RE
        .captures_iter(text)
        .find_map(|caps| recurrence_for_unit(&caps[1]))
}

fn recurrence_for_unit(unit: &str) -> Option<Recurrence> {
    let unit = unit.to_lowercase();
    let freq = match unit.as_str() {
        "day" => Some(Frequency::Daily),
        "week" => Some(Frequency::Weekly),
        "month" => Some(Frequency::Monthly),
        "year" => Some(Frequency::Yearly),
        _ => None,
    };

    if let Some(freq) = freq {
        return Some(Recurrence {
            freq,
            interval: 1,
            by_day: None,
        });
    }

    // Weekday names imply a weekly rule on that day
    unit.parse::<Weekday>().ok().map(|day| Recurrence {
        freq: Frequency::Weekly,
        interval: 1,
        by_day: Some(day),
    })
}
