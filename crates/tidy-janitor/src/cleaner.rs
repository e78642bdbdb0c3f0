//! The column-name cleaning pipeline.
//!
//! Steps run in a fixed order:
//!
//! 1. validate the options (basic cleaning excludes a substitution map)
//! 2. coerce every label to text
//! 3. basic cleaning
//! 4. custom substring substitutions, in map order
//! 5. custom expression chain
//! 6. case conversion
//! 7. duplicate resolution
//!
//! Each step after 2 is skipped when its option is off.

use polars::prelude::{Column, DataFrame, IntoColumn, StringChunked};
use tidy_common::any_to_label;

use crate::basic::basic_cleaning_chain;
use crate::duplicates::resolve_duplicates;
use crate::error::{CleanError, Result};
use crate::options::CleanOptions;
use crate::source::{Cleaned, LabelSource, Relabel};

/// Clean the labels of any supported source.
///
/// Sequences and borrowed frames yield [`Cleaned::Labels`]; an owned frame
/// comes back relabeled as [`Cleaned::Frame`]. A frame whose cleaned labels
/// collide (duplicate resolution off) is rejected with [`CleanError::Frame`].
///
/// # Examples
///
/// ```
/// use tidy_janitor::{CleanOptions, LabelSource, clean_column_names};
///
/// let raw: &[&str] = &["Country Name", "countryName", "Region5"];
/// let cleaned = clean_column_names(LabelSource::from(raw), &CleanOptions::default())
///     .unwrap()
///     .into_labels();
/// assert_eq!(cleaned, vec!["country_name1", "country_name2", "region5"]);
/// ```
pub fn clean_column_names(source: LabelSource<'_>, options: &CleanOptions) -> Result<Cleaned> {
    options.validate()?;
    let labels = source.labels()?;
    let cleaned = run_pipeline(labels, options, options.convert_duplicates);

    match source {
        LabelSource::Sequence(_) | LabelSource::Axis(_) => Ok(Cleaned::Labels(cleaned)),
        LabelSource::Frame(mut df) => {
            df.relabel(cleaned)?;
            Ok(Cleaned::Frame(df))
        }
    }
}

/// Clean a slice of text labels.
pub fn clean_labels<S: AsRef<str>>(labels: &[S], options: &CleanOptions) -> Result<Vec<String>> {
    options.validate()?;
    let labels = labels.iter().map(|s| s.as_ref().to_string()).collect();
    Ok(run_pipeline(labels, options, options.convert_duplicates))
}

/// Clean a single label. Duplicate resolution does not apply.
///
/// # Examples
///
/// ```
/// use tidy_janitor::{CaseProfile, CleanOptions, clean_string};
///
/// let options = CleanOptions::default().with_case(CaseProfile::Pascal);
/// assert_eq!(clean_string("  country-name ", &options).unwrap(), "CountryName");
/// ```
pub fn clean_string(label: &str, options: &CleanOptions) -> Result<String> {
    options.validate()?;
    let cleaned = run_pipeline(vec![label.to_string()], options, false);
    Ok(cleaned.into_iter().next().unwrap_or_default())
}

/// Clean every value of a column, keeping its name.
///
/// Values are cleaned independently with no duplicate resolution, so equal
/// inputs stay equal. Nulls are kept; non-text scalars are coerced to text.
pub fn clean_column_values(column: &Column, options: &CleanOptions) -> Result<Column> {
    options.validate()?;
    let series = column.as_materialized_series();

    let mut positions = Vec::with_capacity(series.len());
    let mut texts = Vec::with_capacity(series.len());
    for position in 0..series.len() {
        let value = series.get(position)?;
        if value.is_null() {
            continue;
        }
        let dtype = value.dtype();
        let text = any_to_label(value).ok_or_else(|| CleanError::TypeMismatch {
            position,
            dtype: dtype.to_string(),
        })?;
        positions.push(position);
        texts.push(text);
    }

    let cleaned = run_pipeline(texts, options, false);
    let mut values: Vec<Option<String>> = vec![None; series.len()];
    for (position, text) in positions.into_iter().zip(cleaned) {
        values[position] = Some(text);
    }

    let out: StringChunked = values.into_iter().collect();
    Ok(out.with_name(column.name().clone()).into_column())
}

/// Clean the labels of `target` and write them back.
pub fn clean_in_place<T: Relabel + ?Sized>(target: &mut T, options: &CleanOptions) -> Result<()> {
    options.validate()?;
    let cleaned = run_pipeline(target.labels(), options, options.convert_duplicates);
    target.relabel(cleaned)
}

/// Relabel the columns of `df` in place.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use tidy_janitor::{CleanOptions, clean_frame_columns_in_place};
///
/// let mut df = df!("Country Name" => ["Sweden"], "Year" => [2018i64]).unwrap();
/// clean_frame_columns_in_place(&mut df, &CleanOptions::default()).unwrap();
/// assert_eq!(df.get_column_names_str(), vec!["country_name", "year"]);
/// ```
pub fn clean_frame_columns_in_place(df: &mut DataFrame, options: &CleanOptions) -> Result<()> {
    clean_in_place(df, options)
}

fn run_pipeline(labels: Vec<String>, options: &CleanOptions, deduplicate: bool) -> Vec<String> {
    let count = labels.len();
    let mut labels = labels;

    if options.basic_cleaning {
        labels = basic_cleaning_chain().apply(labels);
    }

    for (find, replace) in options.substitutions() {
        for label in &mut labels {
            *label = label.replace(find, replace);
        }
    }

    if let Some(chain) = &options.custom_expressions {
        labels = chain.apply(labels);
    }

    if let Some(case) = options.case {
        labels = case.chain().apply(labels);
    }

    if deduplicate {
        labels = resolve_duplicates(labels);
    }

    tracing::debug!(
        labels = count,
        case = options.case.map(|case| case.as_str()),
        basic_cleaning = options.basic_cleaning,
        deduplicate,
        "cleaned labels"
    );
    labels
}
