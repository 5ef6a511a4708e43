//! In-memory thermostat store
//!
//! Owns the thermostat records and applies validated writes. There are no
//! create or delete operations: the set of records is fixed when the store
//! is built.

use serde_json::{Map, Value};
use tracing::debug;

use super::errors::{ServiceError, ServiceResult};
use super::types::{Attribute, FanMode, OperatingMode, Thermostat, ThermostatId};
use super::validator;

/// Per-attribute outcome reported by a successful bulk write
pub const OUTCOME_OK: &str = "ok";

/// In-memory thermostat store.
///
/// Records keep insertion order; ids are unique.
#[derive(Debug, Clone, Default)]
pub struct ThermostatStore {
    records: Vec<Thermostat>,
}

impl ThermostatStore {
    /// Creates a store holding the given records.
    ///
    /// A record whose id is already present replaces the earlier one in place.
    pub fn from_records(records: impl IntoIterator<Item = Thermostat>) -> Self {
        let mut store = Self::default();
        for record in records {
            match store.records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => store.records.push(record),
            }
        }
        store
    }

    /// Creates a store with the two stock thermostats (100 and 101).
    pub fn seeded() -> Self {
        Self::from_records([
            Thermostat {
                id: 100,
                name: "Upstairs Thermostat".to_string(),
                current_temp: 71,
                operating_mode: OperatingMode::Heat,
                cool_setpoint: 75,
                heat_setpoint: 65,
                fan_mode: FanMode::Auto,
            },
            Thermostat {
                id: 101,
                name: "Downstairs Thermostat".to_string(),
                current_temp: 69,
                operating_mode: OperatingMode::Heat,
                cool_setpoint: 75,
                heat_setpoint: 65,
                fan_mode: FanMode::Auto,
            },
        ])
    }

    /// All records, in insertion order
    pub fn list_all(&self) -> &[Thermostat] {
        &self.records
    }

    /// Looks up a record by its external id.
    ///
    /// Ids that do not parse as integers are unknown, same as missing ones.
    pub fn get(&self, id: &str) -> ServiceResult<&Thermostat> {
        let index = self.position(id)?;
        Ok(&self.records[index])
    }

    /// Reads one attribute of a record.
    pub fn get_attribute(&self, id: &str, name: &str) -> ServiceResult<Value> {
        let record = self.get(id)?;
        let attr = Attribute::from_name(name).ok_or_else(|| ServiceError::unknown_attribute(name))?;
        Ok(record.attribute(attr))
    }

    /// Writes one attribute of a record.
    ///
    /// The value is validated first and the normalised form is stored.
    ///
    /// # Errors
    ///
    /// - `UnknownThermostat` if `id` does not resolve
    /// - `UnknownAttribute`, `Readonly` or `Validation` from the attribute rule
    pub fn set_attribute(&mut self, id: &str, name: &str, value: &Value) -> ServiceResult<()> {
        let index = self.position(id)?;
        self.write(index, name, value)
    }

    /// Writes several attributes of one record.
    ///
    /// Each attribute is applied independently, in the order of `values`; a
    /// rejected attribute does not block its siblings. The returned map holds
    /// `"ok"` or the rejection message for every input key.
    ///
    /// # Errors
    ///
    /// `UnknownThermostat` if `id` does not resolve; nothing is written.
    pub fn set_attributes(&mut self, id: &str, values: &Map<String, Value>) -> ServiceResult<Map<String, Value>> {
        let index = self.position(id)?;

        let mut outcomes = Map::with_capacity(values.len());
        for (name, value) in values {
            let outcome = match self.write(index, name, value) {
                Ok(()) => OUTCOME_OK.to_string(),
                Err(e) => e.message(),
            };
            outcomes.insert(name.clone(), Value::String(outcome));
        }
        Ok(outcomes)
    }

    fn position(&self, id: &str) -> ServiceResult<usize> {
        id.parse::<ThermostatId>()
            .ok()
            .and_then(|key| self.records.iter().position(|r| r.id == key))
            .ok_or_else(|| ServiceError::unknown_thermostat(id))
    }

    fn write(&mut self, index: usize, name: &str, value: &Value) -> ServiceResult<()> {
        let validated = validator::validate(name, value)?;
        let record = &mut self.records[index];
        debug!(thermostat = record.id, attribute = name, "attribute updated");
        record.apply(validated);
        Ok(())
    }
}
