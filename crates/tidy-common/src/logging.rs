//! `tracing` subscriber bootstrap for hosts embedding the tidyframe crates.
//!
//! The library crates only emit events. Levels in use:
//!
//! - `warn`: reshape warnings (convert fallback, duplicate union rows)
//! - `debug`: one summary per call (label counts, pivot shapes)
//! - `trace`: each rule applied by a rule chain
//!
//! ```no_run
//! use tidy_common::logging::{LogConfig, LogFormat, init_logging};
//! use tracing::level_filters::LevelFilter;
//!
//! let config = LogConfig::default()
//!     .with_level(LevelFilter::DEBUG)
//!     .with_format(LogFormat::Compact);
//! init_logging(&config).unwrap();
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

/// Targets raised to the configured level; everything else stays at `warn`.
const WORKSPACE_TARGETS: [&str; 3] = ["tidy_common", "tidy_janitor", "tidy_reshape"];

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for the workspace targets.
    pub level_filter: LevelFilter,
    /// Prefer `RUST_LOG` over `level_filter` when it is set and valid.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    pub with_target: bool,
    /// Ignored by the JSON format.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Install the global subscriber, writing to stderr or the configured file.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            init_logging_with_writer::<Mutex<File>>(config, Mutex::new(file))
        }
        None => init_logging_with_writer(config, io::stderr),
    }
}

/// Install the global subscriber with a caller-supplied writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), LoggingError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer(config, writer))
        .try_init()?;
    Ok(())
}

/// Filter directives: `warn` globally, `level_filter` for the workspace crates.
///
/// ```
/// use tidy_common::logging::filter_directives;
/// use tracing::level_filters::LevelFilter;
///
/// assert_eq!(
///     filter_directives(LevelFilter::TRACE),
///     "warn,tidy_common=trace,tidy_janitor=trace,tidy_reshape=trace"
/// );
/// ```
pub fn filter_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(
            WORKSPACE_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    let configured = || EnvFilter::new(filter_directives(config.level_filter));
    if !config.use_env_filter {
        return configured();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured())
}

fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_quiet() {
        let config = LogConfig::default();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.use_env_filter);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let config = LogConfig::default()
            .with_level(LevelFilter::DEBUG)
            .with_format(LogFormat::Json)
            .with_ansi(false)
            .with_target(true)
            .with_log_file("tidy.log");
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert!(config.with_target);
        assert_eq!(config.log_file, Some(PathBuf::from("tidy.log")));
    }

    #[test]
    fn directives_cover_workspace_crates() {
        assert_eq!(
            filter_directives(LevelFilter::DEBUG),
            "warn,tidy_common=debug,tidy_janitor=debug,tidy_reshape=debug"
        );
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let config = LogConfig::default().with_log_file("/nonexistent-dir/tidy.log");
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, LoggingError::LogFile { .. }));
    }
}
