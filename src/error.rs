use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the extractor
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Error parsing datetime '{input}': {source}")]
    #[diagnostic(
        code(event_extractor::datetime_parse),
        help("expected a date like 'Monday, March 3, 2025' and a time like '2:00 pm'")
    )]
    DateTimeParse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Environment error: {0}")]
    #[diagnostic(code(event_extractor::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(event_extractor::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(event_extractor::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(event_extractor::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(event_extractor::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ExtractResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str, reason: &str) -> Error {
    Error::Environment(format!("Invalid environment variable {}: {}", var, reason))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create datetime parse errors
pub fn datetime_error(input: &str, source: chrono::ParseError) -> Error {
    Error::DateTimeParse {
        input: input.to_string(),
        source,
    }
}
