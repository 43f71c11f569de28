//! Error types for parameter validation and configuration loading.
//!
//! Every error is an explicit variant. Configuration problems are fatal and
//! are reported before any timing starts.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // =========================================================================
    // Configuration Errors - Fail-Fast Before Any Measurement
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors abort the process at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown variant: {name} (known: {known})")]
    UnknownVariant { name: String, known: String },
}

/// Result type alias using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_validation_error_display() {
        let err = HardValidationError::InvalidFieldValue {
            field: "repetitions",
            value: "100".to_string(),
            reason: "Repetitions must be > 100".to_string(),
        };
        assert!(err.to_string().contains("repetitions"));
        assert!(err.to_string().contains("> 100"));
    }

    #[test]
    fn test_error_chain() {
        let validation_err = HardValidationError::UnknownVariant {
            name: "curl".to_string(),
            known: "reqwest, hyper".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::HardValidation(_)));
    }
}
