use tracing::debug;

use crate::{
    error::DivisionError,
    quantity::{energy::KilowattHours, proportions::Percent},
    telemetry::BatteryPack,
};

/// State of health: current usable capacity relative to the baseline capacity.
///
/// The value is not clamped, a validated pack never has its current capacity
/// above the baseline.
pub fn state_of_health(pack: &BatteryPack) -> Result<Percent, DivisionError> {
    let baseline = pack.baseline_capacity;
    if baseline <= KilowattHours::ZERO || !baseline.is_finite() {
        return Err(DivisionError { baseline: baseline.0 });
    }
    let state_of_health = Percent::from_ratio(pack.current_capacity / baseline);
    debug!(?state_of_health, ?baseline, current = ?pack.current_capacity);
    Ok(state_of_health)
}

/// Capacity lost since the pack was new, in percent of the baseline.
pub fn capacity_loss(pack: &BatteryPack) -> Result<Percent, DivisionError> {
    Ok(Percent::HUNDRED - state_of_health(pack)?)
}
