//! Attribute validation
//!
//! Writes are gated by a static table mapping each attribute name to an
//! optional validator. An attribute without a validator is read-only; a
//! name missing from the table is unknown.
//!
//! Validators are pure: they either normalise the raw JSON value into an
//! [`AttributeValue`] or return the message explaining the rejection.

use serde_json::Value;

use super::errors::{ServiceError, ServiceResult};
use super::types::{Attribute, AttributeValue, FanMode, OperatingMode};

/// Lowest accepted setpoint, inclusive
pub const SETPOINT_MIN: i64 = 30;
/// Highest accepted setpoint, inclusive
pub const SETPOINT_MAX: i64 = 100;

pub const BLANK_MESSAGE: &str = "value cannot be blank";
pub const NOT_INTEGER_MESSAGE: &str = "value must be an integer";
pub const OUT_OF_RANGE_MESSAGE: &str = "value must be in the range 30-100";

/// Checks and normalises a raw value for one attribute
pub type ValidateFn = fn(&Value) -> Result<AttributeValue, String>;

/// Write rule for one attribute
#[derive(Clone, Copy)]
pub struct AttributeRule {
    pub attribute: Attribute,
    /// `None` marks the attribute read-only
    pub validator: Option<ValidateFn>,
}

impl AttributeRule {
    pub fn is_readonly(&self) -> bool {
        self.validator.is_none()
    }
}

/// Write rules for every record attribute
pub static ATTRIBUTE_RULES: [AttributeRule; 7] = [
    AttributeRule { attribute: Attribute::Id, validator: None },
    AttributeRule { attribute: Attribute::Name, validator: Some(validate_name) },
    AttributeRule { attribute: Attribute::CurrentTemp, validator: None },
    AttributeRule { attribute: Attribute::OperatingMode, validator: Some(validate_operating_mode) },
    AttributeRule { attribute: Attribute::CoolSetpoint, validator: Some(validate_cool_setpoint) },
    AttributeRule { attribute: Attribute::HeatSetpoint, validator: Some(validate_heat_setpoint) },
    AttributeRule { attribute: Attribute::FanMode, validator: Some(validate_fan_mode) },
];

/// Look up the write rule for an attribute name.
pub fn rule_for(name: &str) -> Option<&'static AttributeRule> {
    ATTRIBUTE_RULES.iter().find(|rule| rule.attribute.name() == name)
}

/// Validates a write of `value` to the attribute called `name`.
///
/// # Errors
///
/// - `UnknownAttribute` if `name` is not a record attribute
/// - `Readonly` if the attribute has no validator
/// - `Validation` if the validator rejects the value
pub fn validate(name: &str, value: &Value) -> ServiceResult<AttributeValue> {
    let rule = rule_for(name).ok_or_else(|| ServiceError::unknown_attribute(name))?;
    let validator = rule.validator.ok_or_else(|| ServiceError::readonly(name))?;
    validator(value).map_err(|message| ServiceError::validation(name, message))
}

fn validate_name(value: &Value) -> Result<AttributeValue, String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(AttributeValue::Name(s.clone())),
        _ => Err(BLANK_MESSAGE.to_string()),
    }
}

fn validate_operating_mode(value: &Value) -> Result<AttributeValue, String> {
    let names = OperatingMode::ALL.map(|mode| mode.as_str());
    value
        .as_str()
        .and_then(OperatingMode::parse)
        .map(AttributeValue::OperatingMode)
        .ok_or_else(|| invalid_choice(value, &names))
}

fn validate_fan_mode(value: &Value) -> Result<AttributeValue, String> {
    let names = FanMode::ALL.map(|mode| mode.as_str());
    value
        .as_str()
        .and_then(FanMode::parse)
        .map(AttributeValue::FanMode)
        .ok_or_else(|| invalid_choice(value, &names))
}

fn validate_cool_setpoint(value: &Value) -> Result<AttributeValue, String> {
    setpoint(value).map(AttributeValue::CoolSetpoint)
}

fn validate_heat_setpoint(value: &Value) -> Result<AttributeValue, String> {
    setpoint(value).map(AttributeValue::HeatSetpoint)
}

fn setpoint(value: &Value) -> Result<i64, String> {
    let setpoint = coerce_integer(value).ok_or_else(|| NOT_INTEGER_MESSAGE.to_string())?;
    if !(SETPOINT_MIN..=SETPOINT_MAX).contains(&setpoint) {
        return Err(OUT_OF_RANGE_MESSAGE.to_string());
    }
    Ok(setpoint)
}

/// Integers and base-10 integer strings; booleans and floats are not integers.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn invalid_choice(value: &Value, valid: &[&str]) -> String {
    format!("invalid value {}; must be one of: {}", value, valid.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rejects(name: &str, value: Value) -> String {
        match validate(name, &value) {
            Err(ServiceError::Validation { message, .. }) => message,
            other => panic!("expected validation error for {} = {}, got {:?}", name, value, other),
        }
    }

    #[test]
    fn test_table_covers_every_attribute() {
        for attr in Attribute::ALL {
            let rule = rule_for(attr.name()).expect("missing rule");
            assert_eq!(rule.attribute, attr);
        }
    }

    #[test]
    fn test_readonly_attributes() {
        let readonly: Vec<_> = ATTRIBUTE_RULES
            .iter()
            .filter(|rule| rule.is_readonly())
            .map(|rule| rule.attribute)
            .collect();
        assert_eq!(readonly, vec![Attribute::Id, Attribute::CurrentTemp]);

        assert_eq!(validate("id", &json!(5)), Err(ServiceError::readonly("id")));
        assert_eq!(
            validate("current-temp", &json!(80)),
            Err(ServiceError::readonly("current-temp"))
        );
    }

    #[test]
    fn test_unknown_attribute() {
        assert_eq!(
            validate("location", &json!("bathroom")),
            Err(ServiceError::unknown_attribute("location"))
        );
    }

    #[test]
    fn test_name_validation() {
        for bad in [json!(null), json!(""), json!(true), json!(75), json!([]), json!({})] {
            assert_eq!(rejects("name", bad), BLANK_MESSAGE);
        }
        assert_eq!(
            validate("name", &json!("Testing")),
            Ok(AttributeValue::Name("Testing".to_string()))
        );
    }

    #[test]
    fn test_operating_mode_validation() {
        for bad in [json!(null), json!(true), json!(75), json!({}), json!([]), json!("testing")] {
            let message = rejects("operating-mode", bad);
            assert!(message.contains("cool, heat, off"), "{}", message);
        }
        for mode in OperatingMode::ALL {
            assert_eq!(
                validate("operating-mode", &json!(mode.as_str())),
                Ok(AttributeValue::OperatingMode(mode))
            );
        }
    }

    #[test]
    fn test_fan_mode_validation() {
        let message = rejects("fan-mode", json!("high"));
        assert_eq!(message, r#"invalid value "high"; must be one of: auto, on"#);

        for bad in [json!(null), json!(true), json!(75), json!({}), json!([])] {
            rejects("fan-mode", bad);
        }
        assert_eq!(validate("fan-mode", &json!("on")), Ok(AttributeValue::FanMode(FanMode::On)));
        assert_eq!(validate("fan-mode", &json!("auto")), Ok(AttributeValue::FanMode(FanMode::Auto)));
    }

    #[test]
    fn test_setpoint_validation() {
        for name in ["cool-setpoint", "heat-setpoint"] {
            for bad in [json!(null), json!(true), json!("testing"), json!({}), json!([]), json!(70.5)] {
                assert_eq!(rejects(name, bad), NOT_INTEGER_MESSAGE);
            }
            assert_eq!(rejects(name, json!(29)), OUT_OF_RANGE_MESSAGE);
            assert_eq!(rejects(name, json!(101)), OUT_OF_RANGE_MESSAGE);
            assert_eq!(rejects(name, json!("101")), OUT_OF_RANGE_MESSAGE);

            for setpoint in SETPOINT_MIN..=SETPOINT_MAX {
                assert!(validate(name, &json!(setpoint)).is_ok());
            }
        }
    }

    #[test]
    fn test_numeric_string_setpoint_is_normalised() {
        assert_eq!(
            validate("cool-setpoint", &json!("72")),
            Ok(AttributeValue::CoolSetpoint(72))
        );
        assert_eq!(
            validate("heat-setpoint", &json!(" 60 ")),
            Ok(AttributeValue::HeatSetpoint(60))
        );
    }
}
