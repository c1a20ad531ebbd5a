//! Maintenance recommendations derived from the state of health and the findings.

use std::collections::BTreeMap;

use enumset::EnumSet;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::{
    anomaly::{Category, Finding},
    quantity::proportions::Percent,
};

/// State of health below which the battery should be replaced.
pub const REPLACEMENT_BELOW: Percent = Percent(70.0);

/// State of health below which the battery should be monitored closely.
pub const MONITORING_BELOW: Percent = Percent(80.0);

/// Maintenance action, declared in the priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Action {
    Replacement,
    Monitoring,
    Calibration,
    Balancing,
    CoolingInspection,
    DiagnosticsInspection,
}

/// Ordered set of recommendations, at most one per action.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Recommendations(BTreeMap<Action, &'static str>);

impl Recommendations {
    /// Add the recommendation unless the action is already recommended.
    fn insert(&mut self, action: Action, text: &'static str) {
        self.0.entry(action).or_insert(text);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.keys().copied()
    }

    /// Recommendation texts, the highest priority first.
    pub fn texts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.values().copied()
    }
}

/// Map the state-of-health band and the finding categories onto maintenance actions.
///
/// The state-of-health band goes first, so its wording wins when a finding
/// recommends the same action.
#[instrument(skip_all, fields(state_of_health = ?state_of_health, n_findings = findings.len()))]
pub fn recommend(state_of_health: Percent, findings: &[Finding]) -> Recommendations {
    let mut recommendations = Recommendations::default();

    if state_of_health < REPLACEMENT_BELOW {
        recommendations.insert(Action::Replacement, "Battery replacement recommended");
    } else if state_of_health < MONITORING_BELOW {
        recommendations.insert(Action::Monitoring, "Monitor battery closely");
    }

    let categories = findings.iter().map(|finding| finding.category).collect::<EnumSet<_>>();
    for category in categories {
        let (action, text) = match category {
            Category::CapacityFade => (Action::Replacement, "Consider battery replacement"),
            Category::SocDrift => (Action::Calibration, "SoC calibration needed"),
            Category::VoltageImbalance => (Action::Balancing, "Cell balancing required"),
            Category::Overheating => (Action::CoolingInspection, "Check cooling system"),
            Category::BmsError
            | Category::ThermalEvent
            | Category::Overvoltage
            | Category::Undervoltage
            | Category::Overcurrent => {
                (Action::DiagnosticsInspection, "Inspect BMS diagnostic log")
            }
        };
        recommendations.insert(action, text);
    }

    debug!(recommendations = ?recommendations.texts().collect_vec());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::{Evidence, Severity};

    fn finding(category: Category) -> Finding {
        Finding {
            category,
            severity: Severity::Warning,
            message: String::new(),
            evidence: Evidence::Counter { count: 1 },
        }
    }

    fn texts(state_of_health: f64, categories: &[Category]) -> Vec<&'static str> {
        let findings = categories.iter().copied().map(finding).collect_vec();
        recommend(Percent(state_of_health), &findings).texts().collect()
    }

    #[test]
    fn test_healthy_battery_has_no_recommendations() {
        assert!(recommend(Percent(91.3), &[]).is_empty());
        assert!(recommend(Percent(80.0), &[]).is_empty());
    }

    #[test]
    fn test_state_of_health_bands() {
        assert_eq!(texts(69.9, &[]), ["Battery replacement recommended"]);
        assert_eq!(texts(70.0, &[]), ["Monitor battery closely"]);
        assert_eq!(texts(79.9, &[]), ["Monitor battery closely"]);
    }

    #[test]
    fn test_replacement_is_recommended_once() {
        assert_eq!(texts(65.0, &[Category::CapacityFade]), ["Battery replacement recommended"]);

        let recommendations = recommend(Percent(65.0), &[finding(Category::CapacityFade)]);
        assert_eq!(recommendations.actions().collect_vec(), [Action::Replacement]);
    }

    #[test]
    fn test_fade_within_monitoring_band() {
        assert_eq!(
            texts(73.3, &[Category::CapacityFade]),
            ["Consider battery replacement", "Monitor battery closely"],
        );
    }

    #[test]
    fn test_actions_follow_priority() {
        let findings = [Category::Overheating, Category::SocDrift, Category::Undervoltage]
            .into_iter()
            .map(finding)
            .collect_vec();
        assert_eq!(
            recommend(Percent(72.0), &findings).actions().collect_vec(),
            [
                Action::Monitoring,
                Action::Calibration,
                Action::CoolingInspection,
                Action::DiagnosticsInspection,
            ],
        );
    }

    #[test]
    fn test_priority_order() {
        let texts = texts(
            75.0,
            &[
                Category::Overcurrent,
                Category::Overheating,
                Category::VoltageImbalance,
                Category::SocDrift,
                Category::BmsError,
                Category::CapacityFade,
            ],
        );
        assert_eq!(
            texts,
            [
                "Consider battery replacement",
                "Monitor battery closely",
                "SoC calibration needed",
                "Cell balancing required",
                "Check cooling system",
                "Inspect BMS diagnostic log",
            ],
        );
    }

    #[test]
    fn test_repeated_categories_are_deduplicated() {
        assert_eq!(
            texts(95.0, &[Category::VoltageImbalance, Category::VoltageImbalance]),
            ["Cell balancing required"],
        );
        assert_eq!(
            texts(95.0, &[Category::ThermalEvent, Category::Overvoltage]),
            ["Inspect BMS diagnostic log"],
        );
    }
}
