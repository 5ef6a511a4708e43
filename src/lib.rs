//! thermostat-api - a RESTful service over an in-memory set of thermostats
//!
//! - [`thermostat`]: record store and attribute validation
//! - [`http_server`]: HTTP adapter (routing, status mapping, request checks)
//! - [`cli`]: command-line entry point

pub mod cli;
pub mod http_server;
pub mod thermostat;
