//! CLI command implementations

use std::str::FromStr;

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::http_server::{HttpServer, HttpServerConfig};

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments, initialises logging and serves until shutdown.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level)?;
    serve(cli.server_config())
}

/// Install the global tracing subscriber.
///
/// `level` is the default verbosity; `RUST_LOG` takes precedence when set.
pub fn init_logging(level: &str) -> CliResult<()> {
    let level = parse_level(level)?;
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .map_err(|e| CliError::config_error(format!("Failed to initialise logging: {}", e)))
}

/// Accepts tracing level names plus the `warning` and `critical` aliases.
fn parse_level(level: &str) -> CliResult<Level> {
    let name = match level.to_ascii_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        other => other.to_string(),
    };
    Level::from_str(&name)
        .map_err(|_| CliError::config_error(format!("Invalid log level: {}", level)))
}

/// Run the HTTP server on a fresh tokio runtime until Ctrl-C
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_level("DEBUG").unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_level_aliases() {
        assert_eq!(parse_level("warning").unwrap(), Level::WARN);
        assert_eq!(parse_level("WARNING").unwrap(), Level::WARN);
        assert_eq!(parse_level("critical").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        let err = parse_level("loud").unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
