use itertools::Itertools;

use crate::{
    anomaly::{Category, Evidence, Finding, Severity, Thresholds},
    telemetry::Snapshot,
};

/// Report usage events with an implausible state-of-charge change.
///
/// With a strictly validated snapshot the change can never exceed 100%,
/// so this only fires on snapshots validated with the lenient policy.
pub fn soc_drift(snapshot: &Snapshot, thresholds: &Thresholds) -> Option<Finding> {
    let implausible = snapshot
        .usage_log
        .iter()
        .filter(|event| event.soc_delta() > thresholds.soc_drift)
        .collect_vec();
    let worst = implausible.iter().rev().max_by_key(|event| event.soc_delta())?;
    let worst_delta = worst.soc_delta();
    Some(Finding {
        category: Category::SocDrift,
        severity: Severity::Critical,
        message: format!(
            "SoC drift detected: {} unrealistic change(s), worst {worst_delta:.1} during {} at {}",
            implausible.len(),
            worst.kind,
            worst.timestamp.to_rfc3339(),
        ),
        evidence: Evidence::SocDrift {
            n_events: implausible.len(),
            worst_delta,
            timestamp: worst.timestamp,
            event: worst.kind,
        },
    })
}
