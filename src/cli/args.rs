//! CLI argument definitions using clap
//!
//! Usage: thermostat-api [--log <LEVEL>] [--host <HOST>] [PORT]

use clap::Parser;

use crate::http_server::HttpServerConfig;

/// Run the thermostat web service
#[derive(Parser, Debug)]
#[command(name = "thermostat-api")]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log", default_value = "info")]
    pub log_level: String,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Web server port
    #[arg(env = "THERMOSTAT_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// HTTP server configuration from the parsed arguments
    pub fn server_config(&self) -> HttpServerConfig {
        HttpServerConfig::new(self.host.clone(), self.port)
    }
}
