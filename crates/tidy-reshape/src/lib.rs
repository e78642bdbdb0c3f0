//! Wide/long reshaping for Polars frames.
//!
//! - [`spread`]: pivot key/value pairs into one column per key value
//! - [`gather`]: stack selected columns back into key/value pairs
//! - [`difference`], [`intersection`], [`symmetric_difference`], [`union`]:
//!   row-set operations over frames with the same columns
//!
//! Non-fatal problems come back as [`ReshapeWarning`]s inside [`Reshaped`]
//! and are also logged with `tracing::warn!`.

pub mod error;
pub mod gather;
pub mod options;
pub mod output;
pub mod sets;
pub mod spread;

pub use error::{ReshapeError, ReshapeWarning, Result};
pub use gather::gather;
pub use options::{ColumnSelector, FillValue, GatherOptions, SpreadOptions};
pub use output::Reshaped;
pub use sets::{SOURCE_COLUMN, difference, intersection, symmetric_difference, union};
pub use spread::spread;
