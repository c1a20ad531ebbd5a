//! Telemetry document exactly as decoded, before any validation.
//!
//! Every field is an optional JSON value so that the validator can name the missing
//! or mistyped one instead of failing on the first bad key. Unknown keys are ignored.

use serde::Deserialize;
use serde_json::Value;

#[must_use]
#[derive(Deserialize)]
pub struct RawSnapshot {
    pub vehicle_id: Option<Value>,
    pub timestamp: Option<Value>,

    /// Array of [`RawUsageEvent`] objects.
    pub battery_usage_log: Option<Value>,

    /// [`RawBatteryPack`] object.
    pub battery_pack: Option<Value>,

    /// [`RawDiagnosticFlags`] object.
    pub diagnostic_flags: Option<Value>,
}

#[must_use]
#[derive(Deserialize)]
pub struct RawUsageEvent {
    pub timestamp: Option<Value>,
    pub soc_start: Option<Value>,
    pub soc_end: Option<Value>,
    pub event: Option<Value>,
    pub current_amps: Option<Value>,
    pub power_kw: Option<Value>,
}

#[must_use]
#[derive(Deserialize)]
pub struct RawBatteryPack {
    #[serde(rename = "baseline_capacity_kWh")]
    pub baseline_capacity: Option<Value>,

    #[serde(rename = "current_capacity_kWh")]
    pub current_capacity: Option<Value>,

    pub cell_voltage: Option<Value>,
    pub cell_temperature: Option<Value>,
    pub pack_voltage: Option<Value>,
    pub pack_current: Option<Value>,
    pub pack_temperature: Option<Value>,
    pub internal_resistance: Option<Value>,
}

#[must_use]
#[derive(Deserialize)]
pub struct RawDiagnosticFlags {
    /// Error codes, either strings or integers.
    pub bms_errors: Option<Value>,

    pub thermal_events: Option<Value>,
    pub overvoltage_events: Option<Value>,
    pub undervoltage_events: Option<Value>,
    pub overcurrent_events: Option<Value>,
}
