//! # Thermostat HTTP Server Module
//!
//! RESTful adapter over the thermostat store. Translates service outcomes
//! into HTTP status codes and enforces request conventions.
//!
//! # Endpoints
//!
//! - `/thermostats/` - All thermostats
//! - `/thermostats/{id}/` - One thermostat (GET, PATCH)
//! - `/thermostats/{id}/{attr}/` - One attribute (GET, PUT)

pub mod config;
pub mod errors;
pub mod middleware;
pub mod server;
pub mod thermostat_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use thermostat_routes::ThermostatState;
