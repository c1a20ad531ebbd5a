//! Anomaly rules: pure functions of the snapshot returning zero or one finding each.

mod capacity;
mod diagnostics;
mod soc;
mod temperature;
mod voltage;

pub use self::{
    capacity::capacity_fade,
    diagnostics::diagnostic_events,
    soc::soc_drift,
    temperature::overheating,
    voltage::voltage_imbalance,
};
