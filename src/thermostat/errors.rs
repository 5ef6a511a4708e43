//! Thermostat service errors
//!
//! Every error carries the offending attribute name (or thermostat id) and
//! a human-readable message. The message doubles as the per-attribute
//! outcome reported by bulk updates.

use thiserror::Error;

/// Result type for thermostat service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Thermostat service errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Id does not resolve to a record
    #[error("unknown thermostat {0}")]
    UnknownThermostat(String),

    /// Name is not one of the seven record attributes
    #[error("unknown attribute")]
    UnknownAttribute(String),

    /// Attribute exists but has no validator
    #[error("value is readonly")]
    Readonly(String),

    /// Attribute validator rejected the value
    #[error("{message}")]
    Validation { name: String, message: String },
}

impl ServiceError {
    pub fn unknown_thermostat(id: impl Into<String>) -> Self {
        Self::UnknownThermostat(id.into())
    }

    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::UnknownAttribute(name.into())
    }

    pub fn readonly(name: impl Into<String>) -> Self {
        Self::Readonly(name.into())
    }

    pub fn validation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Attribute name, or thermostat id for `UnknownThermostat`
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownThermostat(name)
            | Self::UnknownAttribute(name)
            | Self::Readonly(name)
            | Self::Validation { name, .. } => name,
        }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ServiceError::unknown_thermostat("102").message(), "unknown thermostat 102");
        assert_eq!(ServiceError::unknown_attribute("location").message(), "unknown attribute");
        assert_eq!(ServiceError::readonly("id").message(), "value is readonly");
        assert_eq!(
            ServiceError::validation("name", "value cannot be blank").message(),
            "value cannot be blank"
        );
    }

    #[test]
    fn test_name_is_carried() {
        assert_eq!(ServiceError::unknown_thermostat("fake").name(), "fake");
        assert_eq!(ServiceError::readonly("current-temp").name(), "current-temp");
        assert_eq!(ServiceError::validation("fan-mode", "x").name(), "fan-mode");
    }
}
