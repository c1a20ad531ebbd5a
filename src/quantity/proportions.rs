use crate::quantity::round_to;

quantity!(Percent, "%");

impl Percent {
    pub const HUNDRED: Self = Self(100.0);

    /// Express the ratio `0..=1` in percent.
    pub const fn from_ratio(ratio: f64) -> Self {
        Self(ratio * 100.0)
    }

    #[must_use]
    pub fn round_to_tenths(self) -> Self {
        Self(round_to(self.0, 1))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_ratio() {
        assert_abs_diff_eq!(Percent::from_ratio(0.25).0, 25.0);
    }

    #[test]
    fn test_round_to_tenths() {
        assert_abs_diff_eq!(Percent(91.333).round_to_tenths().0, 91.3);
        assert_abs_diff_eq!(Percent(73.36).round_to_tenths().0, 73.4);
    }
}
