use chrono::{NaiveDateTime, Weekday};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Timestamp layout used in the output record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const UNKNOWN_START: &str = "Unknown Start";
pub const UNKNOWN_END: &str = "Unknown End";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Extraction pipeline used to build a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Labelled-line regex rules; a malformed date/time is an error
    #[default]
    Pattern,
    /// Entity recognizer with regex fallbacks; parse failures leave fields empty
    Entity,
}

impl Strategy {
    /// Title used when nothing could be extracted
    pub fn title_sentinel(self) -> &'static str {
        match self {
            Strategy::Pattern => UNKNOWN_TITLE,
            Strategy::Entity => UNTITLED_EVENT,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Pattern => write!(f, "pattern"),
            Strategy::Entity => write!(f, "entity"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pattern" | "a" => Ok(Strategy::Pattern),
            "entity" | "b" => Ok(Strategy::Entity),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// Repeat frequency of a recurring event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence rule detected from an "every ..." phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recurrence {
    pub freq: Frequency,
    pub interval: u32,
    pub by_day: Option<Weekday>,
}

impl Serialize for Recurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.by_day.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("Recurrence", fields)?;
        state.serialize_field("freq", &self.freq)?;
        state.serialize_field("interval", &self.interval)?;
        if let Some(day) = self.by_day {
            state.serialize_field("by_day", &[weekday_code(day)])?;
        }
        state.end()
    }
}

/// Two-letter iCalendar day code
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Structured event record extracted from free text.
///
/// Fields are private so that a record can only come out of the
/// extractor; `end` is never set without `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    strategy: Strategy,
    title: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    location: Option<String>,
    summary: String,
    recurrence: Option<Recurrence>,
}

impl EventDetails {
    pub(crate) fn new(
        strategy: Strategy,
        title: Option<String>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        location: Option<String>,
        summary: String,
        recurrence: Option<Recurrence>,
    ) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| strategy.title_sentinel().to_string());
        let end = start.and(end);

        Self {
            strategy,
            title,
            start,
            end,
            location,
            summary,
            recurrence,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }
}

impl Serialize for EventDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.recurrence.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("EventDetails", fields)?;
        state.serialize_field("title", &self.title)?;

        let stamp = |dt: Option<NaiveDateTime>| dt.map(|dt| dt.format(TIMESTAMP_FORMAT).to_string());
        match self.strategy {
            Strategy::Pattern => {
                let start = stamp(self.start).unwrap_or_else(|| UNKNOWN_START.to_string());
                let end = stamp(self.end).unwrap_or_else(|| UNKNOWN_END.to_string());
                state.serialize_field("start", &start)?;
                state.serialize_field("end", &end)?;
                state.serialize_field(
                    "location",
                    self.location.as_deref().unwrap_or(UNKNOWN_LOCATION),
                )?;
            }
            Strategy::Entity => {
                state.serialize_field("start", &stamp(self.start))?;
                state.serialize_field("end", &stamp(self.end))?;
                state.serialize_field("location", &self.location)?;
            }
        }

        state.serialize_field("summary", &self.summary)?;
        if let Some(recurrence) = &self.recurrence {
            state.serialize_field("recurrence", recurrence)?;
        }
        state.end()
    }
}
