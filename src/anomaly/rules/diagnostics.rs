use itertools::Itertools;

use crate::{
    anomaly::{Category, Evidence, Finding, Severity},
    telemetry::Snapshot,
};

/// Report every non-empty diagnostic category of the BMS, one finding per category.
pub fn diagnostic_events(snapshot: &Snapshot) -> Vec<Finding> {
    let flags = &snapshot.flags;
    let mut findings = Vec::new();

    if !flags.bms_errors.is_empty() {
        findings.push(Finding {
            category: Category::BmsError,
            severity: Severity::Warning,
            message: format!(
                "BMS reported {} error code(s): {}",
                flags.bms_errors.len(),
                flags.bms_errors.iter().join(", "),
            ),
            evidence: Evidence::ErrorCodes { codes: flags.bms_errors.iter().cloned().collect() },
        });
    }

    let counters = [
        (Category::ThermalEvent, "thermal", flags.thermal_events),
        (Category::Overvoltage, "overvoltage", flags.overvoltage_events),
        (Category::Undervoltage, "undervoltage", flags.undervoltage_events),
        (Category::Overcurrent, "overcurrent", flags.overcurrent_events),
    ];
    findings.extend(counters.into_iter().filter(|(_, _, count)| *count != 0).map(
        |(category, label, count)| Finding {
            category,
            severity: Severity::Warning,
            message: format!("{count} {label} event(s) recorded by the BMS"),
            evidence: Evidence::Counter { count },
        },
    ));

    findings
}
