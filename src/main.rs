use clap::Parser;
use event_extractor::cli::{clean_argument, Cli, USAGE_PROMPT};
use event_extractor::error::Error;
use event_extractor::{startup, EventDetailExtractor};
use tracing::info;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let Some(raw) = cli.text.as_deref() else {
        println!("{}", USAGE_PROMPT);
        return Ok(());
    };

    let config = startup::load_config(&cli)?;

    // Initialize logging
    startup::init_logging(&config.log_filter)?;

    info!("Using configuration: {:?}", config);

    let extractor = EventDetailExtractor::from_config(&config);
    let details = extractor.extract(clean_argument(raw))?;

    let rendered = if cli.compact {
        serde_json::to_string(&details)
    } else {
        to_indented_json(&details)
    }
    .map_err(Error::from)?;

    println!("{}", rendered);
    Ok(())
}

/// Pretty JSON with four-space indentation
fn to_indented_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
