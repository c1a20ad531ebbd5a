use bon::Builder;

use crate::quantity::{electric::Volts, proportions::Percent, temperature::Celsius};

/// Trigger levels of the anomaly rules, every comparison against them is strict.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Thresholds {
    /// Maximal allowed spread between the highest and the lowest cell voltage.
    #[builder(default = Volts(0.1))]
    pub voltage_imbalance: Volts,

    /// Cell or pack temperature above which the pack is overheating.
    #[builder(default = Celsius(60.0))]
    pub overheating: Celsius,

    /// Cell or pack temperature above which overheating becomes critical.
    #[builder(default = Celsius(80.0))]
    pub critical_temperature: Celsius,

    /// Capacity loss relative to the baseline above which the fade is significant.
    #[builder(default = Percent(20.0))]
    pub capacity_fade: Percent,

    /// State-of-charge change within a single event that is considered implausible.
    #[builder(default = Percent(100.0))]
    pub soc_drift: Percent,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::builder().build()
    }
}
