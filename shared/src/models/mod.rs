//! Domain models for coffee intake assessment

mod assessment;
mod inventory;
mod purchase;
mod supplier;

pub use assessment::*;
pub use inventory::*;
pub use purchase::*;
pub use supplier::*;
