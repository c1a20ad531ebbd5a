use derive_more::AddAssign;
use serde::Serialize;

use crate::{
    quantity::{proportions::Percent, round_to},
    telemetry::{EventKind, UsageEvent},
};

/// State-of-charge swing accumulated per event kind.
#[derive(Copy, Clone, Default, AddAssign)]
struct Throughput {
    charge: Percent,
    discharge: Percent,
}

impl Throughput {
    fn total(self) -> Percent {
        self.charge + self.discharge
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct CycleCount {
    /// Full-cycle equivalents: the total state-of-charge swing divided by 100%,
    /// rounded to two decimal places.
    pub full_cycle_equivalents: f64,

    /// Completed charge cycles, every 100% of accumulated charging counts as one.
    pub charge_cycles: u32,

    /// Completed discharge cycles, every 100% of accumulated discharging counts as one.
    pub discharge_cycles: u32,
}

impl CycleCount {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn whole_cycles(swing: Percent) -> u32 {
        (swing / Percent::HUNDRED).floor() as u32
    }
}

impl<'a> FromIterator<&'a UsageEvent> for CycleCount {
    fn from_iter<T: IntoIterator<Item = &'a UsageEvent>>(events: T) -> Self {
        let mut throughput = Throughput::default();
        for event in events {
            throughput += match event.kind {
                EventKind::Charge => Throughput { charge: event.soc_delta(), ..Default::default() },
                EventKind::Discharge => {
                    Throughput { discharge: event.soc_delta(), ..Default::default() }
                }
            };
        }
        Self {
            full_cycle_equivalents: round_to(throughput.total() / Percent::HUNDRED, 2),
            charge_cycles: Self::whole_cycles(throughput.charge),
            discharge_cycles: Self::whole_cycles(throughput.discharge),
        }
    }
}
