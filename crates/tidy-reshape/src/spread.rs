//! Long-to-wide pivot.
//!
//! Rows are grouped by every column except the key and value columns. Each
//! group becomes one output row, in order of first appearance; each distinct
//! key value becomes one column, sorted numerically for numeric keys and
//! lexically otherwise. Rows with a missing key are skipped.
//!
//! After the pivot the options apply in order: drop, fill, convert, sep.

use std::collections::HashMap;

use polars::prelude::{
    BooleanChunked, ChunkFull, Column, DataFrame, DataType, Float64Chunked, IdxCa, IdxSize,
    Int64Chunked, IntoColumn, NewChunkedArray, PolarsResult, StringChunked,
};
use tidy_common::{any_to_f64, any_to_label, row_key};

use crate::error::{ReshapeError, ReshapeWarning, Result};
use crate::options::{FillValue, SpreadOptions};
use crate::output::Reshaped;

struct PivotKey {
    label: String,
    order: Option<f64>,
}

/// Cell layout of a pivot: which source row lands in which output cell.
struct Pivot {
    first_rows: Vec<IdxSize>,
    keys: Vec<PivotKey>,
    cells: HashMap<(usize, usize), IdxSize>,
}

impl Pivot {
    fn build(id_columns: &[&Column], key_column: &Column) -> Result<Self> {
        let mut groups: HashMap<Vec<Option<String>>, usize> = HashMap::new();
        let mut first_rows = Vec::new();
        let mut key_slots: HashMap<String, usize> = HashMap::new();
        let mut keys = Vec::new();
        let mut cells = HashMap::new();

        for row in 0..key_column.len() {
            let key_value = key_column.get(row)?;
            if key_value.is_null() {
                continue;
            }
            let order = any_to_f64(key_value.clone());
            let label = any_to_label(key_value).ok_or_else(|| ReshapeError::TypeMismatch {
                what: format!("key column '{}'", key_column.name()),
                dtype: key_column.dtype().to_string(),
            })?;

            let next_group = first_rows.len();
            let group = *groups.entry(row_key(id_columns, row)?).or_insert_with(|| {
                first_rows.push(row as IdxSize);
                next_group
            });

            let slot = match key_slots.get(&label) {
                Some(&slot) => slot,
                None => {
                    key_slots.insert(label.clone(), keys.len());
                    keys.push(PivotKey {
                        label: label.clone(),
                        order,
                    });
                    keys.len() - 1
                }
            };

            if cells.insert((slot, group), row as IdxSize).is_some() {
                return Err(ReshapeError::DuplicateKey { key: label, row });
            }
        }

        Ok(Self {
            first_rows,
            keys,
            cells,
        })
    }

    /// Key slots in output column order.
    fn sorted_slots(&self, numeric: bool) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..self.keys.len()).collect();
        if numeric {
            slots.sort_by(|&a, &b| {
                let a = self.keys[a].order.unwrap_or(f64::NAN);
                let b = self.keys[b].order.unwrap_or(f64::NAN);
                a.total_cmp(&b)
            });
        } else {
            slots.sort_by(|&a, &b| self.keys[a].label.cmp(&self.keys[b].label));
        }
        slots
    }

    /// Source row per group for one key; `None` where the cell is empty.
    fn rows_for(&self, slot: usize) -> IdxCa {
        (0..self.first_rows.len())
            .map(|group| self.cells.get(&(slot, group)).copied())
            .collect()
    }
}

/// Pivot `key`/`value` pairs of a long frame into columns.
///
/// Fails with [`ReshapeError::DuplicateKey`] when two rows of the same group
/// share a key value. When `convert` cannot restore the value dtype (for
/// example after a text fill), the affected columns stay text and a
/// [`ReshapeWarning::ConvertFallback`] is returned alongside the frame.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tidy_reshape::{SpreadOptions, spread};
///
/// let long = df!(
///     "country" => ["Sweden", "Sweden", "Denmark"],
///     "year" => [2018i64, 2019, 2018],
///     "actual" => [1i64, 2, 3]
/// )
/// .unwrap();
///
/// let wide = spread(&long, "year", "actual", &SpreadOptions::new().with_sep("_"))
///     .unwrap()
///     .into_frame();
/// assert_eq!(wide.get_column_names_str(), vec!["country", "year_2018", "year_2019"]);
/// assert_eq!(wide.height(), 2);
/// ```
pub fn spread(
    df: &DataFrame,
    key: &str,
    value: &str,
    options: &SpreadOptions,
) -> Result<Reshaped> {
    let key_column = require_column(df, key)?;
    let value_column = require_column(df, value)?;
    if key == value {
        return Err(ReshapeError::SameColumn(key.to_string()));
    }

    let id_columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|column| column.name().as_str() != key && column.name().as_str() != value)
        .collect();

    let pivot = Pivot::build(&id_columns, key_column)?;
    let numeric_keys = key_column.dtype().is_integer() || key_column.dtype().is_float();
    let slots = pivot.sorted_slots(numeric_keys);

    let first_rows = IdxCa::from_vec("rows".into(), pivot.first_rows.clone());
    let mut id_out = id_columns
        .iter()
        .map(|column| column.take(&first_rows))
        .collect::<PolarsResult<Vec<_>>>()?;
    let mut new_out = Vec::with_capacity(slots.len());
    let mut labels = Vec::with_capacity(slots.len());
    for slot in slots {
        let label = pivot.keys[slot].label.clone();
        let cells = value_column.take(&pivot.rows_for(slot))?;
        new_out.push(cells.with_name(label.as_str().into()));
        labels.push(label);
    }

    if options.drop && !new_out.is_empty() {
        let mut keep = BooleanChunked::full("keep".into(), true, pivot.first_rows.len());
        for column in &new_out {
            keep = &keep & &column.is_not_null();
        }
        id_out = filter_all(&id_out, &keep)?;
        new_out = filter_all(&new_out, &keep)?;
    }

    if let Some(fill) = &options.fill {
        new_out = new_out
            .into_iter()
            .map(|column| fill_missing(column, fill))
            .collect::<Result<Vec<_>>>()?;
    }

    let mut warnings = Vec::new();
    if options.convert {
        let target = value_column.dtype().clone();
        let mut fallback = Vec::new();
        for column in &mut new_out {
            if column.dtype() == &target {
                continue;
            }
            match column.strict_cast(&target) {
                Ok(cast) => *column = cast,
                Err(_) => {
                    *column = column.cast(&DataType::String)?;
                    fallback.push(column.name().to_string());
                }
            }
        }
        if !fallback.is_empty() {
            tracing::warn!(columns = ?fallback, dtype = %target, "spread columns kept as text");
            warnings.push(ReshapeWarning::ConvertFallback {
                columns: fallback,
                dtype: target.to_string(),
            });
        }
    }

    // An empty separator leaves the key values as names.
    if let Some(sep) = options.sep.as_deref().filter(|sep| !sep.is_empty()) {
        new_out = new_out
            .into_iter()
            .zip(&labels)
            .map(|(column, label)| column.with_name(format!("{key}{sep}{label}").into()))
            .collect();
    }

    let new_count = new_out.len();
    let frame = DataFrame::new(id_out.into_iter().chain(new_out).collect())?;
    tracing::debug!(
        rows = frame.height(),
        new_columns = new_count,
        key,
        value,
        "spread frame"
    );

    let mut reshaped = Reshaped::new(frame);
    reshaped.warnings = warnings;
    Ok(reshaped)
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| ReshapeError::MissingColumn(name.to_string()))
}

fn filter_all(columns: &[Column], mask: &BooleanChunked) -> Result<Vec<Column>> {
    let filtered = columns
        .iter()
        .map(|column| column.filter(mask))
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok(filtered)
}

/// Fill nulls in one new column.
///
/// Numeric fills into numeric columns stay numeric (integer fills keep
/// integer columns integral); anything else turns the column into text.
fn fill_missing(column: Column, fill: &FillValue) -> Result<Column> {
    if column.null_count() == 0 {
        return Ok(column);
    }
    let dtype = column.dtype().clone();
    let numeric = dtype.is_integer() || dtype.is_float();

    match fill {
        FillValue::Int(v) if dtype.is_integer() => fill_i64(&column, *v),
        FillValue::Int(v) if numeric => fill_f64(&column, *v as f64),
        FillValue::Float(v) if numeric => fill_f64(&column, *v),
        _ => fill_text(&column, &fill.as_text()),
    }
}

fn fill_i64(column: &Column, fill: i64) -> Result<Column> {
    let cast = column.cast(&DataType::Int64)?;
    let values = cast.i64()?;
    Ok(Int64Chunked::from_iter_values(
        column.name().clone(),
        values.into_iter().map(|cell| cell.unwrap_or(fill)),
    )
    .into_column())
}

fn fill_f64(column: &Column, fill: f64) -> Result<Column> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(Float64Chunked::from_iter_values(
        column.name().clone(),
        values.into_iter().map(|cell| cell.unwrap_or(fill)),
    )
    .into_column())
}

fn fill_text(column: &Column, fill: &str) -> Result<Column> {
    let cast = column.cast(&DataType::String)?;
    let values = cast.str()?;
    Ok(StringChunked::from_iter_values(
        column.name().clone(),
        values.into_iter().map(|cell| cell.unwrap_or(fill).to_string()),
    )
    .into_column())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};

    use super::*;

    fn long_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("country".into(), vec!["Sweden", "Sweden", "Denmark"]).into_column(),
            Series::new("year".into(), vec![2018i64, 2019, 2018]).into_column(),
            Series::new("actual".into(), vec![1i64, 2, 3]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_keys_sort_numerically() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec!["a", "a", "a"]).into_column(),
            Series::new("k".into(), vec![10i64, 9, 100]).into_column(),
            Series::new("v".into(), vec![1i64, 2, 3]).into_column(),
        ])
        .unwrap();
        let wide = spread(&df, "k", "v", &SpreadOptions::new())
            .unwrap()
            .into_frame();
        assert_eq!(wide.get_column_names_str(), vec!["id", "9", "10", "100"]);
    }

    #[test]
    fn test_text_keys_sort_lexically() {
        let df = DataFrame::new(vec![
            Series::new("k".into(), vec!["b", "a"]).into_column(),
            Series::new("v".into(), vec![1i64, 2]).into_column(),
        ])
        .unwrap();
        let wide = spread(&df, "k", "v", &SpreadOptions::new())
            .unwrap()
            .into_frame();
        assert_eq!(wide.get_column_names_str(), vec!["a", "b"]);
        assert_eq!(wide.height(), 1);
    }

    #[test]
    fn test_missing_key_rows_are_skipped() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec!["a", "b"]).into_column(),
            Series::new("k".into(), vec![Some("x"), None]).into_column(),
            Series::new("v".into(), vec![1i64, 2]).into_column(),
        ])
        .unwrap();
        let wide = spread(&df, "k", "v", &SpreadOptions::new())
            .unwrap()
            .into_frame();
        assert_eq!(wide.height(), 1);
        assert_eq!(wide.get_column_names_str(), vec!["id", "x"]);
    }

    #[test]
    fn test_missing_cells_are_null_and_keep_dtype() {
        let wide = spread(&long_frame(), "year", "actual", &SpreadOptions::new())
            .unwrap()
            .into_frame();
        let col_2019 = wide.column("2019").unwrap();
        assert_eq!(col_2019.dtype(), &DataType::Int64);
        assert_eq!(col_2019.null_count(), 1);
    }

    #[test]
    fn test_integer_fill_stays_integer() {
        let options = SpreadOptions::new().with_fill(0i64);
        let wide = spread(&long_frame(), "year", "actual", &options)
            .unwrap()
            .into_frame();
        let col_2019 = wide.column("2019").unwrap();
        assert_eq!(col_2019.dtype(), &DataType::Int64);
        assert_eq!(col_2019.i64().unwrap().get(1), Some(0));
    }

    #[test]
    fn test_float_fill_widens_to_float() {
        let options = SpreadOptions::new().with_fill(0.5);
        let wide = spread(&long_frame(), "year", "actual", &options)
            .unwrap()
            .into_frame();
        let col_2019 = wide.column("2019").unwrap();
        assert_eq!(col_2019.dtype(), &DataType::Float64);
        assert_eq!(col_2019.f64().unwrap().get(1), Some(0.5));
    }

    #[test]
    fn test_same_key_and_value() {
        let err = spread(&long_frame(), "year", "year", &SpreadOptions::new()).unwrap_err();
        assert!(matches!(err, ReshapeError::SameColumn(_)));
    }

    #[test]
    fn test_missing_column() {
        let err = spread(&long_frame(), "month", "actual", &SpreadOptions::new()).unwrap_err();
        assert!(matches!(err, ReshapeError::MissingColumn(ref name) if name == "month"));
    }
}
