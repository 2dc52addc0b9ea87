//! Business logic services for coffee intake

pub mod assessment;
pub mod dashboard;
pub mod intake;
pub mod inventory;
pub mod payables;

pub use assessment::{AssessmentOutcome, AssessmentService};
pub use dashboard::{quality_summary, QualitySummary, RejectionEntry};
pub use intake::{AssessedLot, IntakeReport, IntakeWorkflow};
pub use inventory::{IntakeOutcome, InventoryService, SaleCoffeeType};
pub use payables::{lot_payable, PayablesLedger};
