//! Reshape results carrying warnings.

use polars::prelude::DataFrame;

use crate::error::ReshapeWarning;

/// A reshaped frame plus any non-fatal warnings raised on the way.
#[derive(Debug, Clone)]
pub struct Reshaped {
    pub frame: DataFrame,
    pub warnings: Vec<ReshapeWarning>,
}

impl Reshaped {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            warnings: Vec::new(),
        }
    }

    /// Whether any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drop the warnings and keep the frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}
