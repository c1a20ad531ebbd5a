use itertools::Itertools;

use crate::{
    anomaly::{Category, Evidence, Finding, Severity, Thresholds},
    quantity::{electric::Volts, round_to},
    telemetry::Snapshot,
};

/// Report the spread between the highest and the lowest cell voltage when it exceeds the threshold.
///
/// The spread is rounded to millivolts before the comparison, so that floating-point noise
/// does not push a spread of exactly the threshold over it.
pub fn voltage_imbalance(snapshot: &Snapshot, thresholds: &Thresholds) -> Option<Finding> {
    let (min, max) = snapshot.pack.cell_voltages.iter().copied().minmax().into_option()?;
    let spread = Volts(round_to((max - min).0, 3));
    (spread > thresholds.voltage_imbalance).then(|| Finding {
        category: Category::VoltageImbalance,
        severity: Severity::Warning,
        message: format!(
            "Voltage imbalance detected: {spread:.3} spread between cells ({min:.3} to {max:.3})",
        ),
        evidence: Evidence::VoltageSpread { spread, min, max },
    })
}
