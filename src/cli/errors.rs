//! CLI-specific error types
//!
//! All CLI errors are fatal: the process exits non-zero.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid command line configuration
    ConfigError,
    /// Server failed to start or stopped with an error
    ServerError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "THERMOSTAT_CLI_CONFIG_ERROR",
            Self::ServerError => "THERMOSTAT_CLI_SERVER_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Server error
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServerError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::server_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("Invalid log level: loud");
        assert_eq!(
            err.to_string(),
            "THERMOSTAT_CLI_CONFIG_ERROR: Invalid log level: loud"
        );
    }

    #[test]
    fn test_io_error_is_server_error() {
        let err = CliError::from(io::Error::new(io::ErrorKind::AddrInUse, "in use"));
        assert_eq!(err.code(), &CliErrorCode::ServerError);
        assert_eq!(err.message(), "in use");
    }
}
