use std::iter::once;

use itertools::Itertools;

use crate::{
    anomaly::{Category, Evidence, Finding, Sensor, Severity, Thresholds},
    quantity::temperature::Celsius,
    telemetry::Snapshot,
};

impl Thresholds {
    /// Classify a single temperature reading, [`None`] when it is within limits.
    pub fn classify_temperature(&self, temperature: Celsius) -> Option<Severity> {
        if temperature > self.critical_temperature {
            Some(Severity::Critical)
        } else if temperature > self.overheating {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// Report the single worst overheating sensor among the cells and the pack.
///
/// Every reading is classified on its own, then the readings are reduced by severity
/// and then by temperature. Ties resolve to the first sensor, cells before the pack.
pub fn overheating(snapshot: &Snapshot, thresholds: &Thresholds) -> Option<Finding> {
    let pack = &snapshot.pack;
    let offending = pack
        .cell_temperatures
        .iter()
        .copied()
        .enumerate()
        .map(|(index, temperature)| (Sensor::Cell(index), temperature))
        .chain(once((Sensor::Pack, pack.pack_temperature)))
        .filter_map(|(sensor, temperature)| {
            thresholds
                .classify_temperature(temperature)
                .map(|severity| (severity, sensor, temperature))
        })
        .collect_vec();
    let (severity, sensor, hottest) = offending
        .iter()
        .rev()
        .max_by_key(|(severity, _, temperature)| (*severity, *temperature))
        .copied()?;

    let hot_sensors = offending.len();
    let critical_sensors =
        offending.iter().filter(|(severity, ..)| *severity == Severity::Critical).count();
    #[expect(clippy::cast_precision_loss)]
    let mean_cell =
        pack.cell_temperatures.iter().copied().sum::<Celsius>() / pack.cell_temperatures.len() as f64;

    let message = match severity {
        Severity::Critical => format!(
            "Critical overheating: {hottest:.1} at {sensor}, {critical_sensors} sensor(s) above {:.0}",
            thresholds.critical_temperature,
        ),
        Severity::Warning => format!(
            "Overheating detected: {hot_sensors} sensor(s) above {:.0}, hottest {hottest:.1} at {sensor}",
            thresholds.overheating,
        ),
    };
    Some(Finding {
        category: Category::Overheating,
        severity,
        message,
        evidence: Evidence::Temperature {
            hottest,
            sensor,
            hot_sensors,
            critical_sensors,
            mean_cell,
        },
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::telemetry::fixtures::healthy_snapshot;

    fn detect(cell_temperatures: &[f64], pack_temperature: f64) -> Option<Finding> {
        let mut snapshot = healthy_snapshot();
        snapshot.pack.cell_temperatures = cell_temperatures.iter().copied().map(Celsius).collect();
        snapshot.pack.pack_temperature = Celsius(pack_temperature);
        overheating(&snapshot, &Thresholds::default())
    }

    #[test]
    fn test_classify_temperature_boundaries() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify_temperature(Celsius(60.0)), None);
        assert_eq!(thresholds.classify_temperature(Celsius(60.0001)), Some(Severity::Warning));
        assert_eq!(thresholds.classify_temperature(Celsius(80.0)), Some(Severity::Warning));
        assert_eq!(thresholds.classify_temperature(Celsius(80.0001)), Some(Severity::Critical));
    }

    #[test]
    fn test_exactly_critical_temperature_is_warning() {
        let finding = detect(&[30.0, 80.0, 31.0, 32.0], 32.5).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
        assert!(matches!(
            finding.evidence,
            Evidence::Temperature { sensor: Sensor::Cell(1), critical_sensors: 0, .. }
        ));
    }

    #[test]
    fn test_normal_temperatures() {
        assert!(detect(&[25.0, 60.0, 41.0], 60.0).is_none());
    }

    #[test]
    fn test_warning() {
        let finding = detect(&[25.0, 60.0001, 41.0], 35.0).unwrap();
        assert_eq!(finding.category, Category::Overheating);
        assert_eq!(finding.severity, Severity::Warning);
        let Evidence::Temperature { sensor, hot_sensors, critical_sensors, .. } = finding.evidence
        else {
            panic!("unexpected evidence: {:?}", finding.evidence);
        };
        assert_eq!(sensor, Sensor::Cell(1));
        assert_eq!(hot_sensors, 1);
        assert_eq!(critical_sensors, 0);
    }

    #[test]
    fn test_critical_supersedes_warning() {
        let finding = detect(&[65.0, 81.5, 70.0], 62.0).unwrap();
        assert_eq!(finding.severity, Severity::Critical);
        let Evidence::Temperature { hottest, sensor, hot_sensors, critical_sensors, mean_cell } =
            finding.evidence
        else {
            panic!("unexpected evidence: {:?}", finding.evidence);
        };
        assert_abs_diff_eq!(hottest.0, 81.5);
        assert_eq!(sensor, Sensor::Cell(1));
        assert_eq!(hot_sensors, 4);
        assert_eq!(critical_sensors, 1);
        assert_abs_diff_eq!(mean_cell.0, 72.166, epsilon = 0.001);
        assert_eq!(finding.message, "Critical overheating: 81.5 °C at cell[1], 1 sensor(s) above 80 °C");
    }

    #[test]
    fn test_pack_temperature_counts() {
        let finding = detect(&[30.0, 31.0], 90.0).unwrap();
        assert_eq!(finding.severity, Severity::Critical);
        assert!(matches!(finding.evidence, Evidence::Temperature { sensor: Sensor::Pack, .. }));
    }

    #[test]
    fn test_ties_resolve_to_first_sensor() {
        let finding = detect(&[70.0, 75.0, 75.0], 75.0).unwrap();
        assert!(matches!(finding.evidence, Evidence::Temperature { sensor: Sensor::Cell(1), .. }));
    }
}
