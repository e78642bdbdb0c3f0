//! Error and warning types for reshaping.

use std::fmt;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while reshaping frames.
#[derive(Debug, Error)]
pub enum ReshapeError {
    // === Input Errors ===
    /// An argument or column has a type the operation cannot use.
    #[error("{what} has unsupported type {dtype}")]
    TypeMismatch { what: String, dtype: String },

    /// A named column does not exist in the frame.
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// Key and value name the same column.
    #[error("key and value must be different columns, both are '{0}'")]
    SameColumn(String),

    // === Structural Errors ===
    /// More than one row maps to the same output cell.
    #[error("duplicate entry for key '{key}' at row {row}; identifier columns do not identify rows uniquely")]
    DuplicateKey { key: String, row: usize },

    /// A positional selector reaches past the last column.
    #[error("column range {start}..{end} exceeds the {width} available columns")]
    SelectorOutOfRange {
        start: usize,
        end: usize,
        width: usize,
    },

    /// Set operation inputs have different column labels.
    #[error("frames have different columns: {left:?} vs {right:?}")]
    SchemaMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    // === DataFrame Errors ===
    #[error("DataFrame operation failed: {0}")]
    Frame(#[from] PolarsError),
}

impl ReshapeError {
    /// Returns true for errors about the shape of the data rather than the arguments.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. } | Self::SelectorOutOfRange { .. }
        )
    }
}

/// Result type for reshape operations.
pub type Result<T> = std::result::Result<T, ReshapeError>;

/// Non-fatal condition reported next to a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReshapeWarning {
    /// Columns could not be cast back to the value dtype and were kept as text.
    ConvertFallback { columns: Vec<String>, dtype: String },
    /// A union input already held duplicate rows.
    DuplicateRows,
}

impl fmt::Display for ReshapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConvertFallback { columns, dtype } => write!(
                f,
                "columns {columns:?} cannot be cast to {dtype} after filling; kept as text"
            ),
            Self::DuplicateRows => write!(f, "inputs contain duplicate rows; union keeps them"),
        }
    }
}
