//! Error handling for the intake services

use thiserror::Error;

use shared::{InsufficientStock, ValidationErrors};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid amount for {field}: {message}")]
    InvalidAmount { field: String, message: String },

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(#[from] InsufficientStock),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Input/output errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Stable machine-readable code, used in JSON error output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidAmount { .. } => "INVALID_AMOUNT",
            AppError::DuplicateEntry(_) => "DUPLICATE_ENTRY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InsufficientInventory(_) => "INSUFFICIENT_INVENTORY",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "INVALID_JSON",
        }
    }

    pub(crate) fn invalid_amount(field: &str, message: &str) -> Self {
        AppError::InvalidAmount {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
