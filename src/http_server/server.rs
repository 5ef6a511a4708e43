//! # HTTP Server
//!
//! Assembles the thermostat routes with request pre-processing and runs
//! them on a tokio listener.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::errors::ApiError;
use super::middleware::{redirect_to_slash, require_json};
use super::thermostat_routes::{thermostat_routes, ThermostatState};

/// HTTP server exposing the thermostat API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and seeded thermostats
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and seeded thermostats
    pub fn with_config(config: HttpServerConfig) -> Self {
        Self::with_state(config, Arc::new(ThermostatState::default()))
    }

    /// Create a new HTTP server over an existing thermostat state
    pub fn with_state(config: HttpServerConfig, state: Arc<ThermostatState>) -> Self {
        let router = Self::build_router(state);
        Self { config, router }
    }

    /// Build the router with all endpoints and request pre-processing.
    ///
    /// Layers run outermost first: tracing, trailing-slash redirect, then
    /// the JSON content-type check.
    pub fn build_router(state: Arc<ThermostatState>) -> Router {
        Router::new()
            .merge(thermostat_routes(state))
            .fallback(not_found_handler)
            .layer(middleware::from_fn(require_json))
            .layer(middleware::from_fn(redirect_to_slash))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        info!(addr = %listener.local_addr()?, "thermostat API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Shutdown");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
