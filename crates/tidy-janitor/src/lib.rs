//! Column-name normalization.
//!
//! Labels go through a fixed pipeline of optional steps: basic cleaning,
//! custom substring substitutions, a caller-supplied [`RuleChain`], case
//! conversion ([`CaseProfile`]) and duplicate resolution. Configure a run with
//! [`CleanOptions`] and pick an entry point by input kind:
//!
//! - [`clean_column_names`] for a [`LabelSource`] (raw labels, a frame's
//!   column axis, or an owned frame)
//! - [`clean_labels`] / [`clean_string`] for text
//! - [`clean_frame_columns_in_place`] / [`clean_in_place`] to relabel a target
//! - [`clean_column_values`] to clean the values of a text column

pub mod basic;
pub mod case;
pub mod cleaner;
pub mod duplicates;
pub mod error;
pub mod options;
pub mod rule;
pub mod source;

pub use basic::{basic_clean, basic_cleaning_chain};
pub use case::CaseProfile;
pub use cleaner::{
    clean_column_names, clean_column_values, clean_frame_columns_in_place, clean_in_place,
    clean_labels, clean_string,
};
pub use duplicates::resolve_duplicates;
pub use error::{CleanError, Result};
pub use options::CleanOptions;
pub use rule::{CustomRule, Rule, RuleChain, RuleSpec};
pub use source::{Cleaned, LabelSource, Relabel};
