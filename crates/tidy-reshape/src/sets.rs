//! Row-set operations over frames with the same columns.
//!
//! Rows compare by the text form of every cell, in the left frame's column
//! order; nulls equal nulls and differ from empty text. Integral floats compare
//! equal to integers (`2018.0` matches `2018`).

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, DataType, IdxCa, IdxSize};
use tidy_common::row_key;

use crate::error::{ReshapeError, ReshapeWarning, Result};
use crate::output::Reshaped;

/// Column that labels each row of a named symmetric difference with its source.
pub const SOURCE_COLUMN: &str = "original_dataframe";

type RowKey = Vec<Option<String>>;

/// Distinct rows of `left` that do not occur in `right`, in first-seen order.
pub fn difference(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    filter_distinct(left, right, false)
}

/// Distinct rows of `left` that also occur in `right`, in first-seen order.
pub fn intersection(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    filter_distinct(left, right, true)
}

/// Rows found in exactly one frame: `difference(left, right)` followed by
/// `difference(right, left)`.
///
/// With `names`, a [`SOURCE_COLUMN`] column tells which frame each row came
/// from.
pub fn symmetric_difference(
    left: &DataFrame,
    right: &DataFrame,
    names: Option<[&str; 2]>,
) -> Result<DataFrame> {
    let mut only_left = difference(left, right)?;
    let mut only_right = difference(right, left)?;

    if let Some([left_name, right_name]) = names {
        let height = only_left.height();
        only_left.with_column(Column::new(SOURCE_COLUMN.into(), vec![left_name; height]))?;
        let height = only_right.height();
        only_right.with_column(Column::new(SOURCE_COLUMN.into(), vec![right_name; height]))?;
    }

    concat(only_left, &only_right)
}

/// `left` stacked on `right`, duplicates kept.
///
/// Returns a [`ReshapeWarning::DuplicateRows`] when either input already holds
/// repeated rows.
pub fn union(left: &DataFrame, right: &DataFrame) -> Result<Reshaped> {
    let right = aligned(left, right)?;

    let mut warnings = Vec::new();
    if has_duplicate_rows(left)? || has_duplicate_rows(&right)? {
        tracing::warn!("union inputs contain duplicate rows");
        warnings.push(ReshapeWarning::DuplicateRows);
    }

    let mut reshaped = Reshaped::new(concat(left.clone(), &right)?);
    reshaped.warnings = warnings;
    Ok(reshaped)
}

fn filter_distinct(left: &DataFrame, right: &DataFrame, keep_shared: bool) -> Result<DataFrame> {
    let right = aligned(left, right)?;
    let present: HashSet<RowKey> = row_keys(&right)?.into_iter().collect();

    let mut seen = HashSet::new();
    let rows: Vec<IdxSize> = row_keys(left)?
        .into_iter()
        .enumerate()
        .filter_map(|(row, key)| {
            (present.contains(&key) == keep_shared && seen.insert(key)).then_some(row as IdxSize)
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        of = left.height(),
        keep_shared,
        "filtered rows"
    );
    Ok(left.take(&IdxCa::from_vec("rows".into(), rows))?)
}

/// `right` with its columns in `left`'s order; errors if the label sets differ.
fn aligned(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    let mut left_names = labels(left);
    let mut right_names = labels(right);
    let same_width = left_names.len() == right_names.len();
    left_names.sort();
    right_names.sort();
    if !same_width || left_names != right_names {
        return Err(ReshapeError::SchemaMismatch {
            left: labels(left),
            right: labels(right),
        });
    }
    Ok(right.select(left.get_column_names_owned())?)
}

fn labels(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn row_keys(df: &DataFrame) -> Result<Vec<RowKey>> {
    let columns: Vec<&Column> = df.get_columns().iter().collect();
    (0..df.height())
        .map(|row| Ok(row_key(&columns, row)?))
        .collect()
}

fn has_duplicate_rows(df: &DataFrame) -> Result<bool> {
    let keys = row_keys(df)?;
    let distinct: HashSet<&RowKey> = keys.iter().collect();
    Ok(distinct.len() < keys.len())
}

/// Stack `bottom` under `top`; columns whose dtypes disagree become text.
fn concat(mut top: DataFrame, bottom: &DataFrame) -> Result<DataFrame> {
    let mut bottom = aligned(&top, bottom)?;
    for name in top.get_column_names_owned() {
        let top_dtype = top.column(name.as_str())?.dtype().clone();
        let bottom_dtype = bottom.column(name.as_str())?.dtype().clone();
        if top_dtype != bottom_dtype {
            let top_text = top.column(name.as_str())?.cast(&DataType::String)?;
            let bottom_text = bottom.column(name.as_str())?.cast(&DataType::String)?;
            top.with_column(top_text)?;
            bottom.with_column(bottom_text)?;
        }
    }
    Ok(top.vstack(&bottom)?)
}
