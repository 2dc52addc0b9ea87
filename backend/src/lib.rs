//! Coffee intake services
//!
//! Assessment lifecycle, supplier payables, inventory valuation and the
//! quality dashboard, built on the pricing rules in `shared`.

pub mod cli;
pub mod config;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
