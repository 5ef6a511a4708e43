//! thermostat-api entry point
//!
//! Minimal entrypoint: delegates to `cli::run`, prints errors to stderr
//! and exits non-zero on failure.

use thermostat_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
