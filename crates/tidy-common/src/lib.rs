//! Shared utilities for tidyframe crates.
//!
//! This crate provides common utilities used across the workspace:
//!
//! - **cells**: Polars `AnyValue` coercion to labels, text and numbers
//! - **logging**: `tracing` subscriber bootstrap for hosts embedding the crates

pub mod cells;
pub mod logging;

// Re-export commonly used functions at crate root for convenience
pub use cells::{any_to_f64, any_to_label, any_to_string, format_numeric, parse_f64, row_key};
