//! Custom error types for eLoan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::crypto::DecryptError;

/// The main error type for eLoan operations
#[derive(Error, Debug)]
pub enum LoanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Encryption key missing or malformed at startup; fatal
    #[error("Encryption key error: {0}")]
    KeyConfig(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for data models and service inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Credential verification failures
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Encryption errors (key setup, cipher failures)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption failures, carrying the malformed-vs-tampered classification
    #[error("Decryption failed: {0}")]
    Decryption(#[from] DecryptError),

    /// Rejected amortization inputs (non-positive principal/rate/tenure)
    #[error("Invalid schedule parameters: {0}")]
    InvalidScheduleParameters(String),
}

impl LoanError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for loan products
    pub fn loan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Loan product",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for loan applications
    pub fn application_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Application",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for support tickets
    pub fn ticket_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ticket",
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
}

// Implement From traits for common error types

impl From<std::io::Error> for LoanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for eLoan operations
pub type LoanResult<T> = Result<T, LoanError>;
