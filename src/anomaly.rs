mod finding;
mod rules;
mod thresholds;

use itertools::Itertools;
use tracing::{debug, instrument};

pub use self::{
    finding::{Category, Evidence, Finding, Sensor, Severity},
    rules::{capacity_fade, diagnostic_events, overheating, soc_drift, voltage_imbalance},
    thresholds::Thresholds,
};
use crate::telemetry::Snapshot;

/// Run every rule against the snapshot and concatenate the findings in rule order.
///
/// Rules are independent: none of them observes the outcome of another.
#[instrument(skip_all, fields(vehicle_id = %snapshot.vehicle_id))]
pub fn detect(snapshot: &Snapshot, thresholds: &Thresholds) -> Vec<Finding> {
    let findings = voltage_imbalance(snapshot, thresholds)
        .into_iter()
        .chain(overheating(snapshot, thresholds))
        .chain(capacity_fade(snapshot, thresholds))
        .chain(soc_drift(snapshot, thresholds))
        .chain(diagnostic_events(snapshot))
        .collect_vec();
    for finding in &findings {
        debug!(
            category = %finding.category,
            severity = %finding.severity,
            "{}",
            finding.message,
        );
    }
    findings
}
