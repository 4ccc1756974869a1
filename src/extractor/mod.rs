pub mod models;
pub mod patterns;
pub mod recognizer;
pub mod recurrence;
pub mod time;

pub use models::{EventDetails, Frequency, Recurrence, Strategy};
pub use recognizer::{shared_recognizer, Entity, EntityLabel, EntityRecognizer, RuleRecognizer};

use crate::config::Config;
use crate::error::{datetime_error, ExtractResult};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use recognizer::first_entity;
use std::sync::Arc;
use tracing::{debug, warn};

/// Line labels that never form part of an entity-strategy title
const METADATA_LABELS: &[&str] = &["date:", "time:", "location:", "zoom link:"];

/// Turns a free-text announcement into an [`EventDetails`] record
#[derive(Clone)]
pub struct EventDetailExtractor {
    strategy: Strategy,
    default_duration: Duration,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Default for EventDetailExtractor {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl EventDetailExtractor {
    /// Create an extractor using the shared built-in recognizer
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            default_duration: Duration::hours(1),
            recognizer: shared_recognizer(),
        }
    }

    /// Create an extractor from the runtime configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.strategy).with_default_duration(config.default_duration())
    }

    /// Replace the entity recognizer used by the entity strategy
    pub fn with_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    /// Duration used for `end` when the text gives no end time
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Extract event details from text.
    ///
    /// Only the pattern strategy can fail, and only when a labelled date and
    /// time are both present but do not parse together.
    pub fn extract(&self, text: &str) -> ExtractResult<EventDetails> {
        debug!("Extracting event details with {} strategy", self.strategy);
        match self.strategy {
            Strategy::Pattern => self.extract_with_patterns(text),
            Strategy::Entity => Ok(self.extract_with_entities(text)),
        }
    }

    fn extract_with_patterns(&self, text: &str) -> ExtractResult<EventDetails> {
        let title = patterns::title_line(text);
        if title.is_none() {
            debug!("No title line found");
        }

        let summary = patterns::advisor_summary(text)
            .or_else(|| title.and_then(|t| patterns::summary_after_title(text, t)))
            .unwrap_or_else(|| text.trim());

        let (start, end) = match (patterns::labeled_date(text), patterns::labeled_time(text)) {
            (Some(date), Some(clock)) => {
                let combined = format!("{} {}", date, clock);
                let start =
                    time::parse_date_time(&combined).map_err(|e| datetime_error(&combined, e))?;
                (Some(start), time::default_end(start, self.default_duration))
            }
            (date, clock) => {
                debug!(
                    "Skipping start time: date found = {}, time found = {}",
                    date.is_some(),
                    clock.is_some()
                );
                (None, None)
            }
        };

        Ok(EventDetails::new(
            Strategy::Pattern,
            title.map(str::to_string),
            start,
            end,
            patterns::labeled_location(text).map(str::to_string),
            summary.to_string(),
            recurrence::detect_recurrence(text),
        ))
    }

    fn extract_with_entities(&self, text: &str) -> EventDetails {
        let entities = self.recognizer.recognize(text);
        debug!(
            "Recognizer '{}' returned {} entities",
            self.recognizer.name(),
            entities.len()
        );

        let location = first_entity(&entities, EntityLabel::is_place).map(|e| e.text.clone());

        let date_text = first_entity(&entities, |label| label == EntityLabel::Date)
            .map(|e| e.text.as_str())
            .or_else(|| time::find_month_day_year(text));

        let time_range = match first_entity(&entities, |label| label == EntityLabel::Time) {
            Some(entity) => time::parse_time_range(&entity.text),
            None => time::find_clock_time(text).map(|clock| time::TimeRange {
                start: clock.to_string(),
                end: None,
            }),
        };

        let date = date_text.and_then(|raw| {
            let parsed = time::parse_date(raw);
            if parsed.is_none() {
                warn!("Could not parse date '{}', leaving start and end empty", raw);
            }
            parsed
        });

        let (start, end) = match (date, time_range) {
            (Some(date), Some(range)) => {
                let start = combine(date, &range.start);
                let end = start.and_then(|start| {
                    range
                        .end
                        .as_deref()
                        .and_then(|clock| combine(date, clock))
                        .and_then(|end| time::end_after_start(start, end))
                        .or_else(|| time::default_end(start, self.default_duration))
                });
                (start, end)
            }
            _ => (None, None),
        };

        EventDetails::new(
            Strategy::Entity,
            entity_title(text),
            start,
            end,
            location,
            text.trim().to_string(),
            recurrence::detect_recurrence(text),
        )
    }
}

/// Attach a clock time to a parsed date; unparseable clocks yield `None`
fn combine(date: NaiveDate, clock: &str) -> Option<NaiveDateTime> {
    match time::parse_clock(clock) {
        Some(t) => Some(date.and_time(t)),
        None => {
            warn!("Could not parse time '{}', leaving it empty", clock);
            None
        }
    }
}

/// First line of the text once metadata lines are removed
fn entity_title(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| {
            let lower = line.trim_start().to_lowercase();
            !METADATA_LABELS.iter().any(|label| lower.starts_with(label))
        })
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_title_skips_metadata() {
        let text = "\n  DATE: Monday, March 3, 2025\nzoom link: https://example.com\n\nSystems Seminar\nMore text";
        assert_eq!(entity_title(text), Some("Systems Seminar".to_string()));
        assert_eq!(entity_title("Time: 3:00 PM\nLocation: Hall"), None);
    }

    #[test]
    fn test_pattern_summary_after_title() {
        let extractor = EventDetailExtractor::new(Strategy::Pattern);
        let details = extractor
            .extract("Jane Doe\nA talk about type systems.")
            .unwrap();

        assert_eq!(details.title(), "Jane Doe");
        assert_eq!(details.summary(), "A talk about type systems.");
    }

    #[test]
    fn test_pattern_without_title_keeps_whole_text() {
        let extractor = EventDetailExtractor::new(Strategy::Pattern);
        let details = extractor.extract("  lowercase notes only  ").unwrap();

        assert_eq!(details.title(), models::UNKNOWN_TITLE);
        assert_eq!(details.summary(), "lowercase notes only");
    }

    #[test]
    fn test_custom_duration() {
        let extractor = EventDetailExtractor::new(Strategy::Pattern)
            .with_default_duration(Duration::minutes(90));
        let details = extractor
            .extract("Jane Doe\nDate: Monday, March 3, 2025\nTime: 2:00 pm")
            .unwrap();

        let start = details.start().unwrap();
        assert_eq!(details.end(), Some(start + Duration::minutes(90)));
    }

    #[test]
    fn test_entity_time_without_marker_is_dropped() {
        let extractor = EventDetailExtractor::new(Strategy::Entity);
        let details = extractor.extract("Lab meeting\nMonday, March 3, 2025 at 15:00").unwrap();

        assert_eq!(details.start(), None);
        assert_eq!(details.end(), None);
    }

    #[test]
    fn test_entity_recognized_fields() {
        let extractor = EventDetailExtractor::new(Strategy::Entity);
        let details = extractor.extract("Lab meeting\nMonday, March 3, 2025 3:00 PM in Boston").unwrap();

        let start = details.start().unwrap();
        assert_eq!(start.format("%Y-%m-%dT%H:%M").to_string(), "2025-03-03T15:00");
        assert_eq!(details.end(), Some(start + Duration::hours(1)));
        assert_eq!(details.location(), Some("Boston"));
        assert_eq!(details.title(), "Lab meeting");
    }
}
