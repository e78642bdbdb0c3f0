//! Label sources and relabel targets.

use polars::prelude::{AnyValue, DataFrame, PolarsError};
use tidy_common::any_to_label;

use crate::error::{CleanError, Result};

/// Input accepted by [`clean_column_names`](crate::clean_column_names).
#[derive(Debug, Clone)]
pub enum LabelSource<'a> {
    /// Raw labels of any scalar type; cleaned labels come back.
    Sequence(Vec<AnyValue<'a>>),
    /// The column axis of a borrowed frame; cleaned labels come back and the
    /// frame is left alone.
    Axis(&'a DataFrame),
    /// An owned frame; it comes back with its columns relabeled.
    Frame(DataFrame),
}

impl LabelSource<'_> {
    /// Coerce every label to text, in order.
    pub fn labels(&self) -> Result<Vec<String>> {
        match self {
            LabelSource::Sequence(values) => values
                .iter()
                .enumerate()
                .map(|(position, value)| {
                    any_to_label(value.clone()).ok_or_else(|| CleanError::TypeMismatch {
                        position,
                        dtype: value.dtype().to_string(),
                    })
                })
                .collect(),
            LabelSource::Axis(df) => Ok(df.labels()),
            LabelSource::Frame(df) => Ok(df.labels()),
        }
    }
}

impl<'a> From<&'a DataFrame> for LabelSource<'a> {
    fn from(df: &'a DataFrame) -> Self {
        LabelSource::Axis(df)
    }
}

impl From<DataFrame> for LabelSource<'_> {
    fn from(df: DataFrame) -> Self {
        LabelSource::Frame(df)
    }
}

impl<'a> From<Vec<AnyValue<'a>>> for LabelSource<'a> {
    fn from(values: Vec<AnyValue<'a>>) -> Self {
        LabelSource::Sequence(values)
    }
}

impl<'a> From<&[&'a str]> for LabelSource<'a> {
    fn from(values: &[&'a str]) -> Self {
        LabelSource::Sequence(values.iter().map(|s| AnyValue::String(*s)).collect())
    }
}

impl From<Vec<String>> for LabelSource<'_> {
    fn from(values: Vec<String>) -> Self {
        LabelSource::Sequence(
            values
                .into_iter()
                .map(|s| AnyValue::StringOwned(s.into()))
                .collect(),
        )
    }
}

/// Output of [`clean_column_names`](crate::clean_column_names), matching the
/// kind of input.
#[derive(Debug, Clone)]
pub enum Cleaned {
    Labels(Vec<String>),
    Frame(DataFrame),
}

impl Cleaned {
    /// The cleaned labels; for a frame, its column names.
    pub fn into_labels(self) -> Vec<String> {
        match self {
            Cleaned::Labels(labels) => labels,
            Cleaned::Frame(df) => df.labels(),
        }
    }

    /// The relabeled frame, if the input was one.
    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            Cleaned::Frame(df) => Some(df),
            Cleaned::Labels(_) => None,
        }
    }
}

/// Something whose labels can be read and replaced in place.
pub trait Relabel {
    /// Current labels, in order.
    fn labels(&self) -> Vec<String>;

    /// Replace all labels; `labels` must have the current length.
    fn relabel(&mut self, labels: Vec<String>) -> Result<()>;
}

impl Relabel for DataFrame {
    fn labels(&self) -> Vec<String> {
        self.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn relabel(&mut self, labels: Vec<String>) -> Result<()> {
        self.set_column_names(labels)?;
        Ok(())
    }
}

impl Relabel for Vec<String> {
    fn labels(&self) -> Vec<String> {
        self.clone()
    }

    fn relabel(&mut self, labels: Vec<String>) -> Result<()> {
        if labels.len() != self.len() {
            return Err(CleanError::Frame(PolarsError::ShapeMismatch(
                format!("expected {} labels, got {}", self.len(), labels.len()).into(),
            )));
        }
        *self = labels;
        Ok(())
    }
}
