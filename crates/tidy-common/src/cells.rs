//! Polars `AnyValue` coercion helpers.
//!
//! Labels and cells reach the janitor and reshape crates as `AnyValue`s. These
//! helpers turn them into text (labels, row keys, generated column names) and
//! numbers (key ordering) without failing on nulls.

use polars::prelude::{AnyValue, Column, PolarsResult};

/// Renders a cell as plain text.
///
/// Null becomes the empty string, text is unquoted and floats drop a zero
/// fractional part. Everything else uses the `AnyValue` display form.
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(2018)), "2018");
/// assert_eq!(any_to_string(AnyValue::String("country")), "country");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_owned(),
        AnyValue::StringOwned(text) => text.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Coerces a raw label to text.
///
/// Scalars (text, numbers, booleans, temporal values) and nulls are accepted;
/// nested and binary values cannot name a column and yield `None`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::any_to_label;
///
/// assert_eq!(any_to_label(AnyValue::Int64(1)).as_deref(), Some("1"));
/// assert_eq!(any_to_label(AnyValue::String("Name ")).as_deref(), Some("Name "));
/// assert_eq!(any_to_label(AnyValue::Binary(b"raw")), None);
/// ```
pub fn any_to_label(value: AnyValue<'_>) -> Option<String> {
    if matches!(value, AnyValue::Binary(_) | AnyValue::BinaryOwned(_)) || value.dtype().is_nested()
    {
        return None;
    }
    Some(any_to_string(value))
}

/// Shortest text for a float; integral values print without a fraction.
///
/// ```
/// use tidy_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(-0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    // `-0.0` would otherwise render as "-0".
    if v == 0.0 { "0".to_owned() } else { v.to_string() }
}

/// Numeric view of a cell, used for ordering keys.
///
/// Numbers widen to `f64` and text is parsed; nulls, booleans and temporal
/// values give `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::String(text) => parse_f64(text),
        AnyValue::StringOwned(ref text) => parse_f64(text),
        ref v if v.dtype().is_primitive_numeric() => v.extract::<f64>(),
        _ => None,
    }
}

/// Parses trimmed text as `f64`.
pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Builds a comparable key for one row across the given columns.
///
/// Nulls map to `None` so a missing cell never collides with an empty string.
pub fn row_key(columns: &[&Column], idx: usize) -> PolarsResult<Vec<Option<String>>> {
    columns
        .iter()
        .map(|column| {
            let value = column.get(idx)?;
            Ok((!value.is_null()).then(|| any_to_string(value)))
        })
        .collect()
}
