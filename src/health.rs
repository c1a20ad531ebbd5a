mod cycles;
mod soh;

pub use self::{
    cycles::CycleCount,
    soh::{capacity_loss, state_of_health},
};
