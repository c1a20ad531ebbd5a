use bon::bon;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    anomaly::{Finding, Severity},
    error::ReportError,
    health::CycleCount,
    quantity::proportions::Percent,
    recommendation::Recommendations,
};

/// Battery health report of a single snapshot.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub vehicle_id: String,
    pub timestamp: DateTime<Utc>,

    /// State of health, rounded to one decimal place.
    pub soh_percent: Percent,

    /// Full-cycle equivalents, rounded to two decimal places.
    pub full_cycle_count: f64,

    pub charge_cycles: u32,
    pub discharge_cycles: u32,

    /// Findings in the detection order.
    pub findings: Vec<Finding>,

    /// Deduplicated recommendations, the highest priority first.
    pub recommendations: Vec<String>,
}

#[bon]
impl Report {
    #[builder]
    pub fn new(
        #[builder(into)] vehicle_id: String,
        timestamp: DateTime<Utc>,
        state_of_health: Percent,
        cycles: CycleCount,
        #[builder(default)] findings: Vec<Finding>,
        #[builder(default)] recommendations: Recommendations,
    ) -> Result<Self, ReportError> {
        if !state_of_health.is_finite() || state_of_health < Percent::ZERO {
            return Err(ReportError {
                argument: "state_of_health",
                reason: format!("must be finite and non-negative, got {}", state_of_health.0),
            });
        }
        let full_cycle_count = cycles.full_cycle_equivalents;
        if !full_cycle_count.is_finite() || full_cycle_count < 0.0 {
            return Err(ReportError {
                argument: "cycles",
                reason: format!("must be finite and non-negative, got {full_cycle_count}"),
            });
        }
        Ok(Self {
            vehicle_id,
            timestamp,
            soh_percent: state_of_health.round_to_tenths(),
            full_cycle_count,
            charge_cycles: cycles.charge_cycles,
            discharge_cycles: cycles.discharge_cycles,
            findings,
            recommendations: recommendations.texts().map(String::from).collect(),
        })
    }
}

impl Report {
    /// Highest severity among the findings, if any.
    #[must_use]
    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|finding| finding.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        anomaly::{Category, Evidence},
        recommendation::recommend,
    };

    const CYCLES: CycleCount =
        CycleCount { full_cycle_equivalents: 1.5, charge_cycles: 0, discharge_cycles: 1 };

    fn timestamp() -> DateTime<Utc> {
        "2025-03-14T09:30:00Z".parse().unwrap()
    }

    #[test]
    fn test_build_ok() -> Result<(), ReportError> {
        let report = Report::builder()
            .vehicle_id("EV-2024-0042")
            .timestamp(timestamp())
            .state_of_health(Percent(91.333))
            .cycles(CYCLES)
            .build()?;
        assert_eq!(report.vehicle_id, "EV-2024-0042");
        assert_abs_diff_eq!(report.soh_percent.0, 91.3);
        assert_abs_diff_eq!(report.full_cycle_count, 1.5);
        assert_eq!(report.discharge_cycles, 1);
        assert!(report.findings.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.worst_severity(), None);
        Ok(())
    }

    #[test]
    fn test_build_keeps_order() -> Result<(), ReportError> {
        let findings = [Category::VoltageImbalance, Category::CapacityFade]
            .into_iter()
            .zip([Severity::Warning, Severity::Critical])
            .map(|(category, severity)| Finding {
                category,
                severity,
                message: category.to_string(),
                evidence: Evidence::Counter { count: 1 },
            })
            .collect::<Vec<_>>();
        let recommendations = recommend(Percent(73.3), &findings);
        let report = Report::builder()
            .vehicle_id("EV-1")
            .timestamp(timestamp())
            .state_of_health(Percent(73.3))
            .cycles(CYCLES)
            .findings(findings)
            .recommendations(recommendations)
            .build()?;
        assert_eq!(report.findings[0].category, Category::VoltageImbalance);
        assert_eq!(report.findings[1].category, Category::CapacityFade);
        assert_eq!(
            report.recommendations,
            ["Consider battery replacement", "Monitor battery closely", "Cell balancing required"],
        );
        assert_eq!(report.worst_severity(), Some(Severity::Critical));
        Ok(())
    }

    #[test]
    fn test_build_rejects_non_finite_state_of_health() {
        let error = Report::builder()
            .vehicle_id("EV-1")
            .timestamp(timestamp())
            .state_of_health(Percent(f64::NAN))
            .cycles(CYCLES)
            .build()
            .unwrap_err();
        assert_eq!(error.argument, "state_of_health");
    }

    #[test]
    fn test_build_rejects_negative_cycles() {
        let error = Report::builder()
            .vehicle_id("EV-1")
            .timestamp(timestamp())
            .state_of_health(Percent(90.0))
            .cycles(CycleCount { full_cycle_equivalents: -1.0, ..CYCLES })
            .build()
            .unwrap_err();
        assert_eq!(error.argument, "cycles");
    }

    #[test]
    fn test_serialize() -> Result<(), Box<dyn std::error::Error>> {
        let report = Report::builder()
            .vehicle_id("EV-2024-0042")
            .timestamp(timestamp())
            .state_of_health(Percent(91.333))
            .cycles(CYCLES)
            .build()?;
        let json = serde_json::to_value(&report)?;
        assert_eq!(json["vehicle_id"], "EV-2024-0042");
        assert_eq!(json["timestamp"], "2025-03-14T09:30:00Z");
        assert_eq!(json["soh_percent"], 91.3);
        assert_eq!(json["full_cycle_count"], 1.5);
        assert_eq!(json["findings"], serde_json::json!([]));
        Ok(())
    }
}
