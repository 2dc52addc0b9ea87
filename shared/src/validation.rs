//! Input range checks for assessments and stock movements
//!
//! Evaluation never calls these. Callers that want strict input run them
//! first and refuse the record on error.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::QualityMeasurement;

/// One offending field
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every problem found in a record
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{} invalid field(s): {}", .0.len(), join_errors(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Validate a percentage is between 0 and 100 inclusive
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err("Percentage must be between 0 and 100%");
    }
    Ok(())
}

/// Validate a price or cost is not negative
pub fn validate_amount(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Smallest quantity that is still non-zero at two decimal places
pub const MIN_QUANTITY: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validate a stock quantity or payment is at least [`MIN_QUANTITY`]
pub fn validate_quantity(value: Decimal) -> Result<(), &'static str> {
    if value < MIN_QUANTITY {
        return Err("Quantity must be at least 0.01");
    }
    Ok(())
}

/// Check every percentage and price of a measurement, collecting all errors
pub fn validate_measurement(m: &QualityMeasurement) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    for (field, value) in m.percentages() {
        if let Err(message) = validate_percentage(value) {
            errors.push(ValidationError::new(field, message));
        }
    }

    let prices = [
        ("reference_price", m.reference_price),
        ("offered_price", m.offered_price),
    ];
    for (field, value) in prices {
        if let Some(Err(message)) = value.map(validate_amount) {
            errors.push(ValidationError::new(field, message));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
