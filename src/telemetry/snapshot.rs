use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::ValidationError,
    quantity::{
        electric::{Amperes, Ohms, Volts},
        energy::KilowattHours,
        power::Kilowatts,
        proportions::Percent,
        temperature::Celsius,
    },
    telemetry::{RawSnapshot, ValidationPolicy},
};

/// Validated telemetry dump of a single vehicle, the sole input of the engine.
#[must_use]
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub vehicle_id: String,
    pub timestamp: DateTime<Utc>,

    /// Usage events ordered by their timestamps.
    pub usage_log: Vec<UsageEvent>,

    pub pack: BatteryPack,
    pub flags: DiagnosticFlags,
}

impl Snapshot {
    /// Decode the JSON document and validate it.
    pub fn from_json(json: &str, policy: ValidationPolicy) -> Result<Self, ValidationError> {
        serde_json::from_str::<RawSnapshot>(json)?.validate(policy)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Charge,
    Discharge,
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charge => write!(f, "charge"),
            Self::Discharge => write!(f, "discharge"),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct UsageEvent {
    pub timestamp: DateTime<Utc>,
    pub soc_start: Percent,
    pub soc_end: Percent,
    pub kind: EventKind,
    pub current: Amperes,
    pub power: Kilowatts,
}

impl UsageEvent {
    /// Absolute state-of-charge change over the event.
    pub fn soc_delta(&self) -> Percent {
        (self.soc_end - self.soc_start).abs()
    }
}

#[must_use]
#[derive(Clone, Debug)]
pub struct BatteryPack {
    /// Rated usable capacity of a new pack.
    pub baseline_capacity: KilowattHours,

    /// Measured usable capacity, never above the baseline.
    pub current_capacity: KilowattHours,

    /// Per-cell voltages, non-empty.
    pub cell_voltages: Vec<Volts>,

    /// Per-cell temperatures, one per entry in [`BatteryPack::cell_voltages`].
    pub cell_temperatures: Vec<Celsius>,

    pub pack_voltage: Volts,
    pub pack_current: Amperes,
    pub pack_temperature: Celsius,
    pub internal_resistance: Ohms,
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct DiagnosticFlags {
    pub bms_errors: BTreeSet<String>,
    pub thermal_events: u32,
    pub overvoltage_events: u32,
    pub undervoltage_events: u32,
    pub overcurrent_events: u32,
}
