//! Thermostat HTTP Routes
//!
//! - `GET   /thermostats/`              all records
//! - `GET   /thermostats/{id}/`         one record
//! - `PATCH /thermostats/{id}/`         bulk attribute update
//! - `GET   /thermostats/{id}/{attr}/`  one attribute
//! - `PUT   /thermostats/{id}/{attr}/`  set one attribute (204 on success)

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    body::Bytes,
    extract::{path::ErrorKind, rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::thermostat::{ServiceError, Thermostat, ThermostatStore};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// Thermostat store shared across handlers.
///
/// Every write, including a whole bulk update, runs under one write lock.
pub struct ThermostatState {
    store: RwLock<ThermostatStore>,
}

impl ThermostatState {
    pub fn new(store: ThermostatStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, ThermostatStore>> {
        self.store
            .read()
            .map_err(|_| ApiError::Internal("thermostat store lock poisoned".to_string()))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, ThermostatStore>> {
        self.store
            .write()
            .map_err(|_| ApiError::Internal("thermostat store lock poisoned".to_string()))
    }

    /// Snapshot of the current records
    pub fn snapshot(&self) -> ApiResult<Vec<Thermostat>> {
        Ok(self.read()?.list_all().to_vec())
    }
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self::new(ThermostatStore::seeded())
    }
}

// ==================
// Response Types
// ==================

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn new(result: T) -> Json<Self> {
        Json(Self { result })
    }
}

// ==================
// Thermostat Routes
// ==================

/// Create thermostat routes
pub fn thermostat_routes(state: Arc<ThermostatState>) -> Router {
    Router::new()
        .route("/thermostats/", get(list_thermostats_handler))
        .route(
            "/thermostats/:id/",
            get(get_thermostat_handler).patch(patch_thermostat_handler),
        )
        .route(
            "/thermostats/:id/:attr/",
            get(get_attribute_handler).put(put_attribute_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_json(body: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(payload = %String::from_utf8_lossy(body), error = %e, "request payload was invalid JSON");
        ApiError::InvalidJson(e.to_string())
    })
}

fn log_rejection(id: &str, err: &ServiceError) {
    match err {
        ServiceError::UnknownThermostat(_) => warn!(thermostat = %id, "request for unknown thermostat"),
        ServiceError::UnknownAttribute(name) => warn!(attribute = %name, "request for unknown attribute"),
        ServiceError::Readonly(name) => warn!(attribute = %name, "request to change readonly value"),
        ServiceError::Validation { name, message } => {
            warn!(attribute = %name, reason = %message, "rejected invalid value")
        }
    }
}

fn service<T>(id: &str, result: Result<T, ServiceError>) -> ApiResult<T> {
    result.map_err(|e| {
        log_rejection(id, &e);
        ApiError::from(e)
    })
}

/// Position of the id and attribute segments in `/thermostats/{id}/{attr}/`
const ID_SEGMENT: usize = 2;
const ATTR_SEGMENT: usize = 3;

/// Unwrap path parameters, treating undecodable segments as unknown ids or attributes.
fn path_params<T>(path: Result<Path<T>, PathRejection>, uri: &Uri) -> ApiResult<T> {
    let rejection = match path {
        Ok(Path(params)) => return Ok(params),
        Err(rejection) => rejection,
    };

    let raw_segment = |index: usize| uri.path().split('/').nth(index).unwrap_or_default().to_string();
    let err = match &rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } if key == "attr" => {
                ServiceError::unknown_attribute(raw_segment(ATTR_SEGMENT))
            }
            _ => ServiceError::unknown_thermostat(raw_segment(ID_SEGMENT)),
        },
        _ => return Err(ApiError::Internal(rejection.body_text())),
    };
    service(&raw_segment(ID_SEGMENT), Err(err))
}

// ==================
// Handlers
// ==================

async fn list_thermostats_handler(
    State(state): State<Arc<ThermostatState>>,
) -> ApiResult<Json<ResultResponse<Vec<Thermostat>>>> {
    let records = state.snapshot()?;
    debug!(count = records.len(), "listing thermostats");
    Ok(ResultResponse::new(records))
}

async fn get_thermostat_handler(
    State(state): State<Arc<ThermostatState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ResultResponse<Thermostat>>> {
    let id = path_params(path, &uri)?;
    let store = state.read()?;
    let record = service(&id, store.get(&id))?.clone();
    Ok(ResultResponse::new(record))
}

async fn patch_thermostat_handler(
    State(state): State<Arc<ThermostatState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<ResultResponse<Map<String, Value>>>> {
    let values = match parse_json(&body)? {
        Value::Object(values) => values,
        other => {
            warn!(payload = %other, "request payload not a JSON object");
            return Err(ApiError::NotAnObject);
        }
    };
    let id = path_params(path, &uri)?;

    let outcomes = {
        let mut store = state.write()?;
        service(&id, store.set_attributes(&id, &values))?
    };
    debug!(thermostat = %id, ?outcomes, "bulk update applied");
    Ok(ResultResponse::new(outcomes))
}

async fn get_attribute_handler(
    State(state): State<Arc<ThermostatState>>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Json<ResultResponse<Value>>> {
    let (id, attr) = path_params(path, &uri)?;
    let store = state.read()?;
    let value = service(&id, store.get_attribute(&id, &attr))?;
    Ok(ResultResponse::new(value))
}

async fn put_attribute_handler(
    State(state): State<Arc<ThermostatState>>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let value = parse_json(&body)?;
    let (id, attr) = path_params(path, &uri)?;

    {
        let mut store = state.write()?;
        service(&id, store.set_attribute(&id, &attr, &value))?;
    }
    debug!(thermostat = %id, attribute = %attr, "value set");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_seeded() {
        let state = ThermostatState::default();
        let ids: Vec<_> = state.snapshot().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![100, 101]);
    }

    #[test]
    fn test_result_envelope() {
        let Json(body) = ResultResponse::new("auto");
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"result":"auto"}"#);
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_json(b"\"on\"").unwrap(), Value::from("on"));
        assert!(matches!(parse_json(b"testing"), Err(ApiError::InvalidJson(_))));
        assert!(matches!(parse_json(b""), Err(ApiError::InvalidJson(_))));
    }
}
