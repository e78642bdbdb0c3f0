//! Wide-to-long melt.

use polars::prelude::{
    Column, DataFrame, DataType, IdxCa, IdxSize, IntoColumn, PolarsResult, Series, StringChunked,
};

use crate::error::{ReshapeError, Result};
use crate::options::{ColumnSelector, GatherOptions};
use crate::spread::require_column;

/// Dtypes tried, in order, when inferring a text value column.
const INFERENCE_ORDER: [DataType; 3] = [DataType::Int64, DataType::Float64, DataType::Boolean];

/// Stack the selected columns into `key`/`value` pairs.
///
/// Unselected columns are identifiers, repeated once per stacked column.
/// Rows come out column-major: every row of the first selected column, then
/// the next. The key column is text; the value column keeps the shared dtype
/// of the selected columns, or becomes text when they differ.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tidy_reshape::{ColumnSelector, GatherOptions, gather};
///
/// let wide = df!(
///     "country" => ["Sweden", "Denmark"],
///     "2018" => [1i64, 3],
///     "2019" => [2i64, 4]
/// )
/// .unwrap();
///
/// let long = gather(&wide, "year", "actual", &ColumnSelector::from(1..3), &GatherOptions::new())
///     .unwrap();
/// assert_eq!(long.get_column_names_str(), vec!["country", "year", "actual"]);
/// assert_eq!(long.height(), 4);
/// ```
pub fn gather(
    df: &DataFrame,
    key: &str,
    value: &str,
    selector: &ColumnSelector,
    options: &GatherOptions,
) -> Result<DataFrame> {
    if key == value {
        return Err(ReshapeError::SameColumn(key.to_string()));
    }

    let all_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut selected = resolve_selection(df, &all_names, selector)?;
    if options.invert_columns {
        selected = all_names
            .iter()
            .filter(|name| !selected.contains(name))
            .cloned()
            .collect();
    }

    let height = df.height();
    let stacked = selected.len();
    let repeat = IdxCa::from_vec(
        "rows".into(),
        (0..stacked)
            .flat_map(|_| 0..height as IdxSize)
            .collect(),
    );

    let mut columns = Vec::with_capacity(all_names.len() - stacked + 2);
    for name in all_names.iter().filter(|name| !selected.contains(name)) {
        columns.push(df.column(name)?.take(&repeat)?);
    }

    let keys: StringChunked = selected
        .iter()
        .flat_map(|name| std::iter::repeat_n(Some(name.as_str()), height))
        .collect();
    columns.push(keys.with_name(key.into()).into_column());
    columns.push(stack_values(df, &selected, value)?.into_column());

    let mut frame = DataFrame::new(columns)?;

    if options.drop_missing {
        let present = frame.column(value)?.is_not_null();
        frame = frame.filter(&present)?;
    }

    if options.convert {
        let current = frame.column(value)?;
        if current.dtype() == &DataType::String
            && let Some(inferred) = infer_dtype(current)
        {
            frame.with_column(inferred)?;
        }
    }

    tracing::debug!(rows = frame.height(), stacked, key, value, "gathered frame");
    Ok(frame)
}

fn resolve_selection(
    df: &DataFrame,
    all_names: &[String],
    selector: &ColumnSelector,
) -> Result<Vec<String>> {
    match selector {
        ColumnSelector::Names(names) => {
            let mut selected: Vec<String> = Vec::with_capacity(names.len());
            for name in names {
                require_column(df, name)?;
                if !selected.contains(name) {
                    selected.push(name.clone());
                }
            }
            Ok(selected)
        }
        ColumnSelector::Positions(range) => {
            if range.end > all_names.len() {
                return Err(ReshapeError::SelectorOutOfRange {
                    start: range.start,
                    end: range.end,
                    width: all_names.len(),
                });
            }
            Ok(all_names
                .get(range.clone())
                .map(<[String]>::to_vec)
                .unwrap_or_default())
        }
    }
}

fn stack_values(df: &DataFrame, selected: &[String], value: &str) -> Result<Series> {
    let sources = selected
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<&Column>>>()?;
    let uniform = sources
        .windows(2)
        .all(|pair| pair[0].dtype() == pair[1].dtype());

    let mut stacked: Option<Series> = None;
    for source in sources {
        let part = if uniform {
            source.as_materialized_series().clone()
        } else {
            source.cast(&DataType::String)?.take_materialized_series()
        };
        match stacked.as_mut() {
            Some(acc) => {
                acc.append(&part)?;
            }
            None => stacked = Some(part),
        }
    }

    let stacked = stacked.unwrap_or_else(|| Series::new_empty(value.into(), &DataType::String));
    Ok(stacked.with_name(value.into()))
}

/// Most specific dtype every value of a text column casts to, if any.
fn infer_dtype(column: &Column) -> Option<Column> {
    INFERENCE_ORDER
        .iter()
        .find_map(|dtype| column.strict_cast(dtype).ok())
}
