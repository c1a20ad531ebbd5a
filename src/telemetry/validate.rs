use std::{collections::BTreeSet, ops::RangeInclusive};

use chrono::{DateTime, NaiveDateTime, Utc};
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    error::ValidationError,
    quantity::{
        electric::{Amperes, Ohms, Volts},
        energy::KilowattHours,
        power::Kilowatts,
        proportions::Percent,
        temperature::Celsius,
    },
    telemetry::{
        BatteryPack,
        DiagnosticFlags,
        EventKind,
        RawBatteryPack,
        RawDiagnosticFlags,
        RawSnapshot,
        RawUsageEvent,
        Snapshot,
        UsageEvent,
    },
};

type Result<T = (), E = ValidationError> = std::result::Result<T, E>;

const STATE_OF_CHARGE_RANGE: RangeInclusive<f64> = 0.0..=100.0;

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct ValidationPolicy {
    /// Reject usage events with a state of charge outside `0..=100`.
    ///
    /// When disabled, such events are let through (they still have to be finite)
    /// so that the state-of-charge drift detector can report them.
    pub strict_soc_range: bool,
}

impl ValidationPolicy {
    pub const STRICT: Self = Self { strict_soc_range: true };
    pub const LENIENT: Self = Self { strict_soc_range: false };
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

impl RawSnapshot {
    /// Validate the decoded document and normalize it into a [`Snapshot`].
    ///
    /// Fields are checked in document order, the first violation is returned.
    #[instrument(skip_all)]
    pub fn validate(self, policy: ValidationPolicy) -> Result<Snapshot> {
        let vehicle_id = string(self.vehicle_id, "vehicle_id")?;
        if vehicle_id.trim().is_empty() {
            return Err(ValidationError::invalid("vehicle_id", "must not be blank"));
        }
        let timestamp = timestamp(self.timestamp, "timestamp")?;

        let mut usage_log = array(self.battery_usage_log, "battery_usage_log")?
            .into_iter()
            .enumerate()
            .map(|(index, event)| {
                let path = format!("battery_usage_log[{index}]");
                object::<RawUsageEvent>(event, &path)?.validate(&path, policy)
            })
            .collect::<Result<Vec<_>>>()?;
        usage_log.sort_by_key(|event| event.timestamp);

        let pack = object::<RawBatteryPack>(
            required(self.battery_pack, "battery_pack")?,
            "battery_pack",
        )?
        .validate("battery_pack")?;
        let flags = object::<RawDiagnosticFlags>(
            required(self.diagnostic_flags, "diagnostic_flags")?,
            "diagnostic_flags",
        )?
        .validate("diagnostic_flags")?;

        debug!(
            %vehicle_id,
            n_events = usage_log.len(),
            n_cells = pack.cell_voltages.len(),
            "validated the snapshot",
        );
        Ok(Snapshot { vehicle_id, timestamp, usage_log, pack, flags })
    }
}

impl RawUsageEvent {
    fn validate(self, path: &str, policy: ValidationPolicy) -> Result<UsageEvent> {
        let field = |name: &str| format!("{path}.{name}");
        let timestamp = timestamp(self.timestamp, &field("timestamp"))?;
        let soc_start = state_of_charge(self.soc_start, &field("soc_start"), policy)?;
        let soc_end = state_of_charge(self.soc_end, &field("soc_end"), policy)?;
        let kind = match string(self.event, &field("event"))?.as_str() {
            "charge" => EventKind::Charge,
            "discharge" => EventKind::Discharge,
            other => {
                return Err(ValidationError::invalid(
                    field("event"),
                    format!("unknown event kind `{other}`, expected `charge` or `discharge`"),
                ));
            }
        };
        Ok(UsageEvent {
            timestamp,
            soc_start,
            soc_end,
            kind,
            current: Amperes(finite(self.current_amps, &field("current_amps"))?),
            power: Kilowatts(finite(self.power_kw, &field("power_kw"))?),
        })
    }
}

impl RawBatteryPack {
    fn validate(self, path: &str) -> Result<BatteryPack> {
        let field = |name: &str| format!("{path}.{name}");

        let baseline_capacity = finite(self.baseline_capacity, &field("baseline_capacity_kWh"))?;
        if baseline_capacity <= 0.0 {
            return Err(ValidationError::out_of_range(
                field("baseline_capacity_kWh"),
                baseline_capacity,
                "> 0",
            ));
        }
        let current_capacity = finite(self.current_capacity, &field("current_capacity_kWh"))?;
        if current_capacity < 0.0 {
            return Err(ValidationError::out_of_range(
                field("current_capacity_kWh"),
                current_capacity,
                ">= 0",
            ));
        }
        if current_capacity > baseline_capacity {
            return Err(ValidationError::out_of_range(
                field("current_capacity_kWh"),
                current_capacity,
                format!("<= baseline_capacity_kWh ({baseline_capacity})"),
            ));
        }

        let cell_voltages = cell_readings(self.cell_voltage, &field("cell_voltage"))?;
        let cell_temperatures = cell_readings(self.cell_temperature, &field("cell_temperature"))?;
        if cell_temperatures.len() != cell_voltages.len() {
            return Err(ValidationError::invalid(
                field("cell_temperature"),
                format!(
                    "has {} readings while `cell_voltage` has {}",
                    cell_temperatures.len(),
                    cell_voltages.len(),
                ),
            ));
        }

        let internal_resistance = finite(self.internal_resistance, &field("internal_resistance"))?;
        if internal_resistance < 0.0 {
            return Err(ValidationError::out_of_range(
                field("internal_resistance"),
                internal_resistance,
                ">= 0",
            ));
        }

        Ok(BatteryPack {
            baseline_capacity: KilowattHours(baseline_capacity),
            current_capacity: KilowattHours(current_capacity),
            cell_voltages: cell_voltages.into_iter().map(Volts).collect_vec(),
            cell_temperatures: cell_temperatures.into_iter().map(Celsius).collect_vec(),
            pack_voltage: Volts(finite(self.pack_voltage, &field("pack_voltage"))?),
            pack_current: Amperes(finite(self.pack_current, &field("pack_current"))?),
            pack_temperature: Celsius(finite(self.pack_temperature, &field("pack_temperature"))?),
            internal_resistance: Ohms(internal_resistance),
        })
    }
}

impl RawDiagnosticFlags {
    fn validate(self, path: &str) -> Result<DiagnosticFlags> {
        let field = |name: &str| format!("{path}.{name}");
        let bms_errors = array(self.bms_errors, &field("bms_errors"))?
            .into_iter()
            .enumerate()
            .map(|(index, code)| match code {
                Value::String(code) => Ok(code),
                Value::Number(code) if code.is_i64() || code.is_u64() => Ok(code.to_string()),
                other => Err(ValidationError::invalid(
                    format!("{path}.bms_errors[{index}]"),
                    format!("expected an error code, got `{other}`"),
                )),
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(DiagnosticFlags {
            bms_errors,
            thermal_events: counter(self.thermal_events, &field("thermal_events"))?,
            overvoltage_events: counter(self.overvoltage_events, &field("overvoltage_events"))?,
            undervoltage_events: counter(self.undervoltage_events, &field("undervoltage_events"))?,
            overcurrent_events: counter(self.overcurrent_events, &field("overcurrent_events"))?,
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ValidationError::missing(field))
}

/// Decode a nested object, its own fields are checked by the caller.
fn object<T: DeserializeOwned>(value: Value, field: &str) -> Result<T> {
    if !value.is_object() {
        return Err(ValidationError::invalid(field, format!("expected an object, got `{value}`")));
    }
    serde_json::from_value(value).map_err(|error| ValidationError::invalid(field, error.to_string()))
}

fn array(value: Option<Value>, field: &str) -> Result<Vec<Value>> {
    match required(value, field)? {
        Value::Array(items) => Ok(items),
        other => Err(ValidationError::invalid(field, format!("expected an array, got `{other}`"))),
    }
}

fn string(value: Option<Value>, field: &str) -> Result<String> {
    match required(value, field)? {
        Value::String(value) => Ok(value),
        other => Err(ValidationError::invalid(field, format!("expected a string, got `{other}`"))),
    }
}

fn number(value: Value, field: &str) -> Result<f64> {
    let number = value.as_f64().ok_or_else(|| {
        ValidationError::invalid(field, format!("expected a number, got `{value}`"))
    })?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(ValidationError::out_of_range(field, number, "a finite number"))
    }
}

fn finite(value: Option<Value>, field: &str) -> Result<f64> {
    number(required(value, field)?, field)
}

#[expect(clippy::cast_precision_loss)]
fn counter(value: Option<Value>, field: &str) -> Result<u32> {
    let value = required(value, field)?;
    if let Some(count) = value.as_i64() {
        u32::try_from(count).map_err(|_| {
            ValidationError::out_of_range(field, count as f64, "a non-negative counter")
        })
    } else if let Some(count) = value.as_u64() {
        Err(ValidationError::out_of_range(field, count as f64, "a non-negative counter"))
    } else {
        Err(ValidationError::invalid(field, format!("expected an integer, got `{value}`")))
    }
}

fn cell_readings(value: Option<Value>, field: &str) -> Result<Vec<f64>> {
    let values = array(value, field)?;
    if values.is_empty() {
        return Err(ValidationError::invalid(field, "must contain at least one cell"));
    }
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| number(value, &format!("{field}[{index}]")))
        .collect()
}

fn state_of_charge(value: Option<Value>, field: &str, policy: ValidationPolicy) -> Result<Percent> {
    let value = finite(value, field)?;
    if !STATE_OF_CHARGE_RANGE.contains(&value) {
        if policy.strict_soc_range {
            return Err(ValidationError::out_of_range(field, value, "0..=100"));
        }
        warn!(field, value, "state of charge is out of range, letting it through");
    }
    Ok(Percent(value))
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one which is taken as UTC.
fn timestamp(value: Option<Value>, field: &str) -> Result<DateTime<Utc>> {
    let value = string(value, field)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|_| value.parse::<NaiveDateTime>().map(|timestamp| timestamp.and_utc()))
        .map_err(|error| {
            ValidationError::invalid(field, format!("`{value}` is not an ISO-8601 timestamp: {error}"))
        })
}
