//! Custom error types for finboard
//!
//! This module defines the error hierarchy for the crate using thiserror.
//! Validation errors belong to the caller-facing input layer; the only
//! error the core computations raise is [`FinboardError::NonPositiveLimit`].

use thiserror::Error;

use crate::models::Money;

/// The main error type for finboard operations
#[derive(Error, Debug)]
pub enum FinboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input and new records
    #[error("Validation error: {0}")]
    Validation(String),

    /// Percentage of budget requested against a limit that is zero or negative
    #[error("Cannot compute percentage of budget for '{category}': limit is {limit}")]
    NonPositiveLimit { category: String, limit: Money },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Data source errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinboardError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a domain error raised by the aggregation core
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::NonPositiveLimit { .. })
    }
}

impl From<std::io::Error> for FinboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinboardError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for FinboardError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for finboard operations
pub type FinboardResult<T> = Result<T, FinboardError>;
