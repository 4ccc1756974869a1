use crate::cli::Cli;
use crate::config::Config;
use crate::error::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration.
///
/// `RUST_LOG` wins; otherwise `fallback` is used. Logs go to stderr so that
/// stdout only carries the extracted record.
pub fn init_logging(fallback: &str) -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the config and apply command-line overrides
pub fn load_config(cli: &Cli) -> miette::Result<Config> {
    let mut config = Config::load()?;

    cli.apply(&mut config);
    config.validate()?;

    Ok(config)
}
