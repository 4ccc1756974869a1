use crate::config::Config;
use crate::extractor::Strategy;
use clap::Parser;

/// Printed when no text is given
pub const USAGE_PROMPT: &str = "Please provide the event details as an argument.";

/// Extract structured event details from a free-text announcement
#[derive(Debug, Parser)]
#[command(name = "event-extractor", version)]
pub struct Cli {
    /// Announcement text to parse
    pub text: Option<String>,

    /// Extraction strategy: "pattern" (labelled lines) or "entity" (recognizer)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Event length in minutes when no end time is given
    #[arg(short, long, value_name = "MINUTES")]
    pub duration: Option<i64>,

    /// Print the record on a single line
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(minutes) = self.duration {
            config.default_duration_minutes = minutes;
        }
    }
}

/// Trim the argument and drop one pair of surrounding quotes left by shells
pub fn clean_argument(raw: &str) -> &str {
    let text = raw.trim();
    let text = text
        .strip_prefix(|c: char| c == '"' || c == '\'')
        .unwrap_or(text);
    text.strip_suffix(|c: char| c == '"' || c == '\'')
        .unwrap_or(text)
}
