//! Error types for column-name cleaning.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while cleaning labels.
#[derive(Debug, Error)]
pub enum CleanError {
    // === Input Errors ===
    /// A raw label or column cannot be turned into text.
    #[error("label at position {position} has unsupported type {dtype}")]
    TypeMismatch { position: usize, dtype: String },

    // === Configuration Errors ===
    /// Basic cleaning and a custom substitution map were both requested.
    #[error(
        "basic_cleaning and custom_transformation are mutually exclusive; disable basic_cleaning to use a custom substitution map"
    )]
    ConflictingOptions,

    /// Case profile token is not one of snake, camel, pascal (or s, c, p).
    #[error("unknown case profile '{0}'; expected snake, camel or pascal (s, c, p)")]
    UnknownCase(String),

    /// A rule pattern failed to compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // === DataFrame Errors ===
    /// The container rejected the relabel (e.g. duplicate column names).
    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

impl CleanError {
    /// Returns true for errors caused by the option set rather than the input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConflictingOptions | Self::UnknownCase(_) | Self::InvalidPattern { .. }
        )
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CleanError::UnknownCase("kebab".to_string());
        assert_eq!(
            err.to_string(),
            "unknown case profile 'kebab'; expected snake, camel or pascal (s, c, p)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = PolarsError::ColumnNotFound("test".into());
        let clean_err: CleanError = polars_err.into();
        assert!(matches!(clean_err, CleanError::Frame(_)));
        assert!(!clean_err.is_configuration());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(CleanError::ConflictingOptions.is_configuration());
        assert!(
            !CleanError::TypeMismatch {
                position: 0,
                dtype: "binary".to_string()
            }
            .is_configuration()
        );
    }
}
