use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use enumset::EnumSetType;
use serde::Serialize;

use crate::{
    quantity::{
        electric::Volts,
        energy::KilowattHours,
        proportions::Percent,
        temperature::Celsius,
    },
    telemetry::EventKind,
};

#[derive(Debug, Serialize, EnumSetType)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    VoltageImbalance,
    Overheating,
    CapacityFade,
    SocDrift,
    BmsError,
    ThermalEvent,
    Overvoltage,
    Undervoltage,
    Overcurrent,
}

impl Category {
    /// Whether the category comes from the BMS diagnostic counters rather than from measurements.
    pub const fn is_diagnostic(self) -> bool {
        matches!(
            self,
            Self::BmsError
                | Self::ThermalEvent
                | Self::Overvoltage
                | Self::Undervoltage
                | Self::Overcurrent
        )
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VoltageImbalance => write!(f, "voltage_imbalance"),
            Self::Overheating => write!(f, "overheating"),
            Self::CapacityFade => write!(f, "capacity_fade"),
            Self::SocDrift => write!(f, "soc_drift"),
            Self::BmsError => write!(f, "bms_error"),
            Self::ThermalEvent => write!(f, "thermal_event"),
            Self::Overvoltage => write!(f, "overvoltage"),
            Self::Undervoltage => write!(f, "undervoltage"),
            Self::Overcurrent => write!(f, "overcurrent"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Temperature sensor location.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    /// Cell at the index in the cell arrays.
    Cell(usize),

    Pack,
}

impl Display for Sensor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cell(index) => write!(f, "cell[{index}]"),
            Self::Pack => write!(f, "pack"),
        }
    }
}

/// Measured values that triggered a finding.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    VoltageSpread {
        spread: Volts,
        min: Volts,
        max: Volts,
    },

    Temperature {
        hottest: Celsius,
        sensor: Sensor,
        hot_sensors: usize,
        critical_sensors: usize,
        mean_cell: Celsius,
    },

    CapacityLoss {
        loss: Percent,
        baseline: KilowattHours,
        current: KilowattHours,
    },

    SocDrift {
        n_events: usize,
        worst_delta: Percent,
        timestamp: DateTime<Utc>,
        event: EventKind,
    },

    ErrorCodes {
        codes: Vec<String>,
    },

    Counter {
        count: u32,
    },
}

#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    pub evidence: Evidence,
}
