use tracing::{info, instrument};

use crate::{
    anomaly::{self, Thresholds},
    error::EngineError,
    health::{CycleCount, state_of_health},
    recommendation::recommend,
    report::Report,
    telemetry::Snapshot,
};

/// Diagnostic pipeline over a validated snapshot.
///
/// The engine is stateless apart from its configuration and may be reused
/// for any number of snapshots.
#[must_use]
#[derive(Copy, Clone, Debug, Default)]
pub struct Engine {
    pub thresholds: Thresholds,
}

impl Engine {
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    #[instrument(skip_all, fields(vehicle_id = %snapshot.vehicle_id))]
    pub fn generate(&self, snapshot: &Snapshot) -> Result<Report, EngineError> {
        let state_of_health = state_of_health(&snapshot.pack)?;
        let cycles = snapshot.usage_log.iter().collect::<CycleCount>();
        let findings = anomaly::detect(snapshot, &self.thresholds);
        let recommendations = recommend(state_of_health, &findings);
        info!(
            %state_of_health,
            full_cycles = cycles.full_cycle_equivalents,
            n_findings = findings.len(),
            "generated",
        );
        Ok(Report::builder()
            .vehicle_id(snapshot.vehicle_id.as_str())
            .timestamp(snapshot.timestamp)
            .state_of_health(state_of_health)
            .cycles(cycles)
            .findings(findings)
            .recommendations(recommendations)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        anomaly::Category,
        error::DivisionError,
        quantity::{electric::Volts, energy::KilowattHours, proportions::Percent},
        telemetry::fixtures::healthy_snapshot,
    };

    #[test]
    fn test_healthy_snapshot() -> Result<(), EngineError> {
        let report = Engine::default().generate(&healthy_snapshot())?;
        assert_eq!(report.vehicle_id, "EV-2024-0042");
        assert_abs_diff_eq!(report.soh_percent.0, 91.3);
        assert_abs_diff_eq!(report.full_cycle_count, 1.5);
        assert_eq!(report.charge_cycles, 0);
        assert_eq!(report.discharge_cycles, 1);
        assert!(report.findings.is_empty());
        assert!(report.recommendations.is_empty());
        Ok(())
    }

    #[test]
    fn test_low_state_of_health_with_fade() -> Result<(), EngineError> {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.current_capacity = KilowattHours(48.75);
        let report = Engine::default().generate(&snapshot)?;
        assert_abs_diff_eq!(report.soh_percent.0, 65.0);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].category, Category::CapacityFade);
        assert_eq!(report.recommendations, ["Battery replacement recommended"]);
        Ok(())
    }

    #[test]
    fn test_custom_thresholds() -> Result<(), EngineError> {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.cell_voltages = vec![Volts(3.65), Volts(3.67), Volts(3.70), Volts(3.68)];

        let report = Engine::default().generate(&snapshot)?;
        assert!(report.findings.is_empty());

        let thresholds = Thresholds::builder().voltage_imbalance(Volts(0.04)).build();
        let report = Engine::new(thresholds).generate(&snapshot)?;
        assert_eq!(report.findings[0].category, Category::VoltageImbalance);
        assert_eq!(report.recommendations, ["Cell balancing required"]);
        Ok(())
    }

    #[test]
    fn test_band_uses_measured_state_of_health() -> Result<(), EngineError> {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.baseline_capacity = KilowattHours(100.0);
        snapshot.pack.current_capacity = KilowattHours(69.96);
        let report = Engine::default().generate(&snapshot)?;
        assert_abs_diff_eq!(report.soh_percent.0, 70.0);
        assert_eq!(report.recommendations, ["Battery replacement recommended"]);
        Ok(())
    }

    #[test]
    fn test_degenerate_baseline() {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.baseline_capacity = KilowattHours::ZERO;
        let error = Engine::default().generate(&snapshot).unwrap_err();
        assert!(matches!(error, EngineError::Division(DivisionError { .. })));
    }

    #[test]
    fn test_monitoring_band() -> Result<(), EngineError> {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.current_capacity = KilowattHours(56.25);
        let report = Engine::default().generate(&snapshot)?;
        assert_eq!(report.soh_percent, Percent(75.0));
        assert_eq!(report.findings.len(), 1);
        assert_eq!(
            report.recommendations,
            ["Consider battery replacement", "Monitor battery closely"],
        );
        Ok(())
    }
}
