//! Thermostat record types
//!
//! A record has exactly seven attributes. `id` and `current-temp` are
//! read-only; the rest are writable through a validator.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Thermostat identifier
pub type ThermostatId = i64;

/// Operating mode of a thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    Cool,
    Heat,
    Off,
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 3] = [OperatingMode::Cool, OperatingMode::Heat, OperatingMode::Off];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingMode::Cool => "cool",
            OperatingMode::Heat => "heat",
            OperatingMode::Off => "off",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fan mode of a thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanMode {
    Auto,
    On,
}

impl FanMode {
    pub const ALL: [FanMode; 2] = [FanMode::Auto, FanMode::On];

    pub fn as_str(&self) -> &'static str {
        match self {
            FanMode::Auto => "auto",
            FanMode::On => "on",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven named attributes of a thermostat record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Id,
    Name,
    CurrentTemp,
    OperatingMode,
    CoolSetpoint,
    HeatSetpoint,
    FanMode,
}

impl Attribute {
    /// All attributes, in record order
    pub const ALL: [Attribute; 7] = [
        Attribute::Id,
        Attribute::Name,
        Attribute::CurrentTemp,
        Attribute::OperatingMode,
        Attribute::CoolSetpoint,
        Attribute::HeatSetpoint,
        Attribute::FanMode,
    ];

    /// External (wire) name of the attribute
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Id => "id",
            Attribute::Name => "name",
            Attribute::CurrentTemp => "current-temp",
            Attribute::OperatingMode => "operating-mode",
            Attribute::CoolSetpoint => "cool-setpoint",
            Attribute::HeatSetpoint => "heat-setpoint",
            Attribute::FanMode => "fan-mode",
        }
    }

    /// Resolve an external name; `None` for anything outside the seven fields
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that has passed validation for a writable attribute.
///
/// Only writable attributes have a variant, so a read-only field can never
/// be assigned through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Name(String),
    OperatingMode(OperatingMode),
    CoolSetpoint(i64),
    HeatSetpoint(i64),
    FanMode(FanMode),
}

/// A thermostat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Thermostat {
    pub id: ThermostatId,
    pub name: String,
    pub current_temp: i64,
    pub operating_mode: OperatingMode,
    pub cool_setpoint: i64,
    pub heat_setpoint: i64,
    pub fan_mode: FanMode,
}

impl Thermostat {
    /// Current value of one attribute as JSON
    pub fn attribute(&self, attr: Attribute) -> Value {
        match attr {
            Attribute::Id => Value::from(self.id),
            Attribute::Name => Value::from(self.name.clone()),
            Attribute::CurrentTemp => Value::from(self.current_temp),
            Attribute::OperatingMode => Value::from(self.operating_mode.as_str()),
            Attribute::CoolSetpoint => Value::from(self.cool_setpoint),
            Attribute::HeatSetpoint => Value::from(self.heat_setpoint),
            Attribute::FanMode => Value::from(self.fan_mode.as_str()),
        }
    }

    /// Store a validated value
    pub fn apply(&mut self, value: AttributeValue) {
        match value {
            AttributeValue::Name(name) => self.name = name,
            AttributeValue::OperatingMode(mode) => self.operating_mode = mode,
            AttributeValue::CoolSetpoint(setpoint) => self.cool_setpoint = setpoint,
            AttributeValue::HeatSetpoint(setpoint) => self.heat_setpoint = setpoint,
            AttributeValue::FanMode(mode) => self.fan_mode = mode,
        }
    }
}
