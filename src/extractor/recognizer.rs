//! Named-entity recognition used by the entity strategy.
//!
//! [`EntityRecognizer`] is the seam for plugging in any tagger. The crate
//! ships [`RuleRecognizer`], a regex and gazetteer tagger that is built once
//! per process and handed out through [`shared_recognizer`].

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Semantic category of a recognized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    /// Geo-political entity: city, state, country
    Gpe,
    /// Non-GPE location
    Loc,
    /// Facility: building, room, hall
    Fac,
    Date,
    Time,
}

impl EntityLabel {
    /// Whether the entity can serve as an event location
    pub fn is_place(self) -> bool {
        matches!(self, EntityLabel::Gpe | EntityLabel::Loc | EntityLabel::Fac)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Fac => "FAC",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
        };
        f.write_str(name)
    }
}

/// A typed span of the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
}

impl Entity {
    pub fn new(label: EntityLabel, text: &str, start: usize) -> Self {
        Self {
            label,
            text: text.to_string(),
            start,
            end: start + text.len(),
        }
    }
}

/// Something that can tag spans of text with entity labels.
///
/// Implementations must return entities in document order.
pub trait EntityRecognizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// First entity in document order whose label satisfies the predicate
pub fn first_entity<'a>(
    entities: &'a [Entity],
    accept: impl Fn(EntityLabel) -> bool,
) -> Option<&'a Entity> {
    entities.iter().find(|entity| accept(entity.label))
}

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";
const CLOCK: &str = r"\d{1,2}:\d{2}(?:\s?[AaPp]\.?[Mm]\.?)?";
const FACILITY_NOUNS: &str =
    "Hall|Auditorium|Library|Center|Centre|Building|Theater|Theatre|Stadium|Arena|Museum";

/// Cities tagged as geo-political entities
const PLACES: &[&str] = &[
    "New York",
    "Los Angeles",
    "San Francisco",
    "Chicago",
    "Boston",
    "Seattle",
    "Austin",
    "Washington",
    "Toronto",
    "Vancouver",
    "London",
    "Paris",
    "Berlin",
    "Amsterdam",
    "Helsinki",
    "Stockholm",
    "Tokyo",
    "Singapore",
    "Sydney",
];

/// A single regex rule; `group` selects the capture that forms the span
struct Rule {
    label: EntityLabel,
    regex: Regex,
    group: usize,
}

impl Rule {
    fn new(label: EntityLabel, pattern: &str, group: usize) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("built-in {} rule does not compile: {}", label, e));
        Self {
            label,
            regex,
            group,
        }
    }
}

/// Regex and gazetteer based recognizer
pub struct RuleRecognizer {
    rules: Vec<Rule>,
}

impl RuleRecognizer {
    pub fn new() -> Self {
        let places = PLACES
            .iter()
            .map(|place| regex::escape(place))
            .collect::<Vec<_>>()
            .join("|");

        let rules = vec![
            Rule::new(
                EntityLabel::Date,
                &format!(
                    r"\b(?:(?:{WEEKDAYS}),?\s+)?(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,\s*\d{{4}})?\b"
                ),
                0,
            ),
            Rule::new(EntityLabel::Date, r"\b\d{4}-\d{2}-\d{2}\b", 0),
            Rule::new(EntityLabel::Date, r"(?i)\b(?:today|tomorrow|tonight)\b", 0),
            Rule::new(
                EntityLabel::Time,
                &format!(r"\b{CLOCK}(?:\s*(?:-|–|—|\bto\b)\s*{CLOCK})?"),
                0,
            ),
            Rule::new(EntityLabel::Time, r"\b\d{1,2}\s?[AaPp]\.?[Mm]\b\.?", 0),
            Rule::new(EntityLabel::Time, r"(?i)\b(?:noon|midnight)\b", 0),
            Rule::new(EntityLabel::Fac, r"(?m)^[ \t]*Location:[ \t]*([^\r\n]*\S)", 1),
            Rule::new(
                EntityLabel::Fac,
                r"\b(?:Room|Rm\.|Suite|Lab|Building|Bldg\.)[ \t]+[A-Z0-9][\w-]*",
                0,
            ),
            Rule::new(
                EntityLabel::Fac,
                &format!(r"\b(?:[A-Z][\w'-]*[ \t]+)+(?:{FACILITY_NOUNS})\b"),
                0,
            ),
            Rule::new(EntityLabel::Gpe, &format!(r"\b(?:{places})\b"), 0),
            Rule::new(
                EntityLabel::Loc,
                r"\b(?:at|in)[ \t]+((?:the[ \t]+)?[A-Z][\w'-]*(?:[ \t]+[A-Z][\w'-]*)*)",
                1,
            ),
        ];

        Self { rules }
    }

    fn candidates(&self, text: &str) -> Vec<Entity> {
        let mut found = Vec::new();

        for rule in &self.rules {
            for caps in rule.regex.captures_iter(text) {
                let Some(span) = caps.get(rule.group) else {
                    continue;
                };
                if rule.label == EntityLabel::Loc && starts_with_calendar_word(span.as_str()) {
                    continue;
                }
                found.push(Entity::new(rule.label, span.as_str(), span.start()));
            }
        }

        found
    }
}

impl Default for RuleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for RuleRecognizer {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn recognize(&self, text: &str) -> Vec<Entity> {
        let entities = resolve_overlaps(self.candidates(text));
        debug!("Recognized {} entities", entities.len());
        entities
    }
}

/// Keep the earliest, then longest, span wherever candidates overlap
fn resolve_overlaps(mut candidates: Vec<Entity>) -> Vec<Entity> {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Entity> = Vec::with_capacity(candidates.len());
    for entity in candidates {
        if kept.last().map_or(true, |last| entity.start >= last.end) {
            kept.push(entity);
        }
    }
    kept
}

/// "in March" or "on Monday" read as a place otherwise
fn starts_with_calendar_word(span: &str) -> bool {
    let first = span
        .split_whitespace()
        .find(|word| !word.eq_ignore_ascii_case("the"))
        .unwrap_or_default();

    MONTHS.split('|').chain(WEEKDAYS.split('|')).any(|word| word == first)
}

lazy_static! {
    static ref SHARED_RECOGNIZER: Arc<RuleRecognizer> = {
        info!("Warming up rule-based entity recognizer");
        Arc::new(RuleRecognizer::new())
    };
}

/// Process-wide recognizer, built on first use and never torn down
pub fn shared_recognizer() -> Arc<dyn EntityRecognizer> {
    SHARED_RECOGNIZER.clone()
}
