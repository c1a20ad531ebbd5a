//! Sample snapshots shared by the unit tests.

use crate::telemetry::{Snapshot, ValidationPolicy};

pub const HEALTHY_SNAPSHOT: &str = include_str!("../../tests/fixtures/healthy_snapshot.json");

/// Healthy four-cell pack at 91.3% state of health with three usage events.
pub fn healthy_snapshot() -> Snapshot {
    Snapshot::from_json(HEALTHY_SNAPSHOT, ValidationPolicy::STRICT).unwrap()
}
