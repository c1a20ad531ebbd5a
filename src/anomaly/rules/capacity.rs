use crate::{
    anomaly::{Category, Evidence, Finding, Severity, Thresholds},
    health::capacity_loss,
    quantity::{proportions::Percent, round_to},
    telemetry::Snapshot,
};

/// Division noise allowance, far below any capacity reading resolution.
const TOLERANCE: Percent = Percent(1e-9);

/// Report significant capacity fade relative to the baseline.
///
/// The measured loss is compared as is, the evidence carries it rounded to hundredths.
pub fn capacity_fade(snapshot: &Snapshot, thresholds: &Thresholds) -> Option<Finding> {
    let pack = &snapshot.pack;

    // Degenerate baseline is reported by the state-of-health calculator.
    let loss = capacity_loss(pack).ok()?;

    (loss > thresholds.capacity_fade + TOLERANCE).then(|| Finding {
        category: Category::CapacityFade,
        severity: Severity::Critical,
        message: format!("Significant capacity fade detected: {loss:.1} loss"),
        evidence: Evidence::CapacityLoss {
            loss: Percent(round_to(loss.0, 2)),
            baseline: pack.baseline_capacity,
            current: pack.current_capacity,
        },
    })
}
