use event_extractor::extractor::{Entity, EntityLabel, EntityRecognizer};
use event_extractor::{EventDetailExtractor, Strategy};
use std::sync::Arc;

/// Recognizer stub that returns a fixed set of entities for any text
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    entities: Vec<Entity>,
}

impl MockRecognizer {
    /// Build a mock from (label, text) pairs, placing each span at its first occurrence in `text`
    pub fn tagging(text: &str, spans: &[(EntityLabel, &str)]) -> Self {
        let entities = spans
            .iter()
            .map(|(label, span)| {
                let start = text.find(span).expect("span must occur in text");
                Entity::new(*label, span, start)
            })
            .collect();

        Self { entities }
    }
}

impl EntityRecognizer for MockRecognizer {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn recognize(&self, _text: &str) -> Vec<Entity> {
        self.entities.clone()
    }
}

fn extractor(mock: MockRecognizer) -> EventDetailExtractor {
    EventDetailExtractor::new(Strategy::Entity).with_recognizer(Arc::new(mock))
}

fn stamp(dt: Option<chrono::NaiveDateTime>) -> Option<String> {
    dt.map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
}

/// Nothing recognized and nothing for the fallbacks to find
#[test]
fn test_recognizer_finds_nothing() {
    let text = "Office hours\nDrop by around 3:00 PM";
    let details = extractor(MockRecognizer::default()).extract(text).unwrap();

    assert_eq!(details.start(), None);
    assert_eq!(details.end(), None);
    assert_eq!(details.location(), None);
    assert_eq!(details.summary(), text);
}

#[test]
fn test_time_range_entity() {
    let text = "Seminar on Monday, March 3, 2025 from 3:00 PM - 4:00 PM";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Date, "Monday, March 3, 2025"),
            (EntityLabel::Time, "3:00 PM - 4:00 PM"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();

    assert_eq!(stamp(details.start()).as_deref(), Some("2025-03-03T15:00"));
    assert_eq!(stamp(details.end()).as_deref(), Some("2025-03-03T16:00"));
}

#[test]
fn test_fallbacks_fill_missing_entities() {
    let text = "Thesis defense\nWhen: March 3, 2025, 10:30 AM";
    let mock = MockRecognizer::tagging(text, &[(EntityLabel::Person, "Thesis")]);
    let details = extractor(mock).extract(text).unwrap();

    assert_eq!(stamp(details.start()).as_deref(), Some("2025-03-03T10:30"));
    assert_eq!(stamp(details.end()).as_deref(), Some("2025-03-03T11:30"));
    assert_eq!(details.location(), None);
}

#[test]
fn test_first_place_entity_wins() {
    let text = "Jane Doe visits Memorial Hall in Boston";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Person, "Jane Doe"),
            (EntityLabel::Fac, "Memorial Hall"),
            (EntityLabel::Gpe, "Boston"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();

    assert_eq!(details.location(), Some("Memorial Hall"));
    assert_eq!(details.title(), text);
}

#[test]
fn test_unparseable_entities_are_soft_misses() {
    let text = "Planning sync next Tuesday at 15:00 - 4:00 PM";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Date, "next Tuesday"),
            (EntityLabel::Time, "15:00 - 4:00 PM"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();
    assert_eq!(details.start(), None);
    assert_eq!(details.end(), None);

    // A parseable date with a start lacking AM/PM still drops the end
    let text = "Planning sync Monday, March 3, 2025 at 15:00 - 4:00 PM";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Date, "Monday, March 3, 2025"),
            (EntityLabel::Time, "15:00 - 4:00 PM"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();
    assert_eq!(details.start(), None);
    assert_eq!(details.end(), None);

    // An end lacking AM/PM falls back to the default duration
    let text = "Planning sync Monday, March 3, 2025 at 3:00 PM - 4:00";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Date, "Monday, March 3, 2025"),
            (EntityLabel::Time, "3:00 PM - 4:00"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();
    assert_eq!(stamp(details.start()), Some("2025-03-03T15:00".to_string()));
    assert_eq!(stamp(details.end()), Some("2025-03-03T16:00".to_string()));
}

#[test]
fn test_overnight_range_ends_next_day() {
    let text = "Stargazing night Monday, March 3, 2025 from 10:00 PM - 1:00 AM";
    let mock = MockRecognizer::tagging(
        text,
        &[
            (EntityLabel::Date, "Monday, March 3, 2025"),
            (EntityLabel::Time, "10:00 PM - 1:00 AM"),
        ],
    );
    let details = extractor(mock).extract(text).unwrap();
    assert_eq!(stamp(details.start()), Some("2025-03-03T22:00".to_string()));
    assert_eq!(stamp(details.end()), Some("2025-03-04T01:00".to_string()));
    assert!(details.end() > details.start());
}
