//! Options for spread and gather.

use std::ops::Range;

use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};

use tidy_common::format_numeric;

use crate::error::ReshapeError;

/// Value substituted for missing cells in spread columns.
///
/// Booleans are not accepted: deserializing `true` fails, and so does
/// converting an `AnyValue::Boolean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FillValue {
    /// Text form used when the target column holds text.
    pub fn as_text(&self) -> String {
        match self {
            FillValue::Int(v) => v.to_string(),
            FillValue::Float(v) => format_numeric(*v),
            FillValue::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for FillValue {
    fn from(value: i64) -> Self {
        FillValue::Int(value)
    }
}

impl From<f64> for FillValue {
    fn from(value: f64) -> Self {
        FillValue::Float(value)
    }
}

impl From<&str> for FillValue {
    fn from(value: &str) -> Self {
        FillValue::Text(value.to_string())
    }
}

impl From<String> for FillValue {
    fn from(value: String) -> Self {
        FillValue::Text(value)
    }
}

impl TryFrom<AnyValue<'_>> for FillValue {
    type Error = ReshapeError;

    fn try_from(value: AnyValue<'_>) -> Result<Self, Self::Error> {
        let fill = match value {
            AnyValue::Int8(v) => FillValue::Int(i64::from(v)),
            AnyValue::Int16(v) => FillValue::Int(i64::from(v)),
            AnyValue::Int32(v) => FillValue::Int(i64::from(v)),
            AnyValue::Int64(v) => FillValue::Int(v),
            AnyValue::UInt8(v) => FillValue::Int(i64::from(v)),
            AnyValue::UInt16(v) => FillValue::Int(i64::from(v)),
            AnyValue::UInt32(v) => FillValue::Int(i64::from(v)),
            AnyValue::UInt64(v) => match i64::try_from(v) {
                Ok(v) => FillValue::Int(v),
                Err(_) => FillValue::Float(v as f64),
            },
            AnyValue::Float32(v) => FillValue::Float(f64::from(v)),
            AnyValue::Float64(v) => FillValue::Float(v),
            AnyValue::String(s) => FillValue::Text(s.to_string()),
            AnyValue::StringOwned(s) => FillValue::Text(s.to_string()),
            other => {
                return Err(ReshapeError::TypeMismatch {
                    what: "fill value".to_string(),
                    dtype: other.dtype().to_string(),
                });
            }
        };
        Ok(fill)
    }
}

/// Options for [`spread`](crate::spread).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadOptions {
    /// Substitute for missing cells in the new columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillValue>,

    /// Cast the new columns back to the value column's dtype.
    pub convert: bool,

    /// Drop rows with a missing cell in any new column.
    pub drop: bool,

    /// Name new columns `<key><sep><key value>`. Empty means no prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sep: Option<String>,
}

impl SpreadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<FillValue>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    #[must_use]
    pub fn with_drop(mut self, drop: bool) -> Self {
        self.drop = drop;
        self
    }

    #[must_use]
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = Some(sep.into());
        self
    }
}

/// Columns to stack in [`gather`](crate::gather).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelector {
    /// Columns by name, in the given order.
    Names(Vec<String>),
    /// Columns by position; `end` may not exceed the column count.
    Positions(Range<usize>),
}

impl ColumnSelector {
    /// Select columns by name.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnSelector::Names(names.into_iter().map(Into::into).collect())
    }
}

impl From<Range<usize>> for ColumnSelector {
    fn from(range: Range<usize>) -> Self {
        ColumnSelector::Positions(range)
    }
}

impl From<Vec<String>> for ColumnSelector {
    fn from(names: Vec<String>) -> Self {
        ColumnSelector::Names(names)
    }
}

/// Options for [`gather`](crate::gather).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherOptions {
    /// Drop rows whose value is missing.
    pub drop_missing: bool,

    /// Infer the most specific dtype for a text value column.
    pub convert: bool,

    /// Stack every column except the selected ones.
    pub invert_columns: bool,
}

impl GatherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drop_missing(mut self, drop_missing: bool) -> Self {
        self.drop_missing = drop_missing;
        self
    }

    #[must_use]
    pub fn with_convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    #[must_use]
    pub fn with_invert_columns(mut self, invert_columns: bool) -> Self {
        self.invert_columns = invert_columns;
        self
    }
}
