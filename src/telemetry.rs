mod raw;
mod snapshot;
mod validate;

#[cfg(test)]
pub mod fixtures;

pub use self::{
    raw::{RawBatteryPack, RawDiagnosticFlags, RawSnapshot, RawUsageEvent},
    snapshot::{BatteryPack, DiagnosticFlags, EventKind, Snapshot, UsageEvent},
    validate::ValidationPolicy,
};
