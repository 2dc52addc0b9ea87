//! Shared types and pricing rules for coffee intake assessment
//!
//! This crate holds everything that must agree between the backend
//! services and the browser preview (via WASM): the domain models, the
//! pricing engine and input validation.

pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
