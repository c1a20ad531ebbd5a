#[macro_use]
mod macros;

pub mod electric;
pub mod energy;
pub mod power;
pub mod proportions;
pub mod temperature;

/// Round the value to the given number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
