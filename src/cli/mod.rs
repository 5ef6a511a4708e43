//! CLI module for the thermostat API
//!
//! Parses arguments, sets up logging, and runs the HTTP server.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{init_logging, run, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
