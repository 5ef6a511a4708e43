//! Thermostat record store and attribute validation
//!
//! # Attribute rules
//!
//! - `id`, `current-temp`: read-only
//! - `name`: non-empty string
//! - `operating-mode`: one of cool, heat, off
//! - `cool-setpoint`, `heat-setpoint`: integer in 30-100 (numeric strings accepted)
//! - `fan-mode`: one of auto, on
//!
//! Any other name is an unknown attribute.

mod errors;
mod store;
mod types;
mod validator;

pub use errors::{ServiceError, ServiceResult};
pub use store::{ThermostatStore, OUTCOME_OK};
pub use types::{Attribute, AttributeValue, FanMode, OperatingMode, Thermostat, ThermostatId};
pub use validator::{rule_for, validate, AttributeRule, ATTRIBUTE_RULES, SETPOINT_MAX, SETPOINT_MIN};
