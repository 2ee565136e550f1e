//! Tracing/logging initialization.
//!
//! Logs go to stderr so that reports written to stdout stay machine-readable.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOGIFLOW_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, for local runs.
    Pretty,
}

impl LogFormat {
    /// Parse a format name, or `None` if it is not one we know.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "text" => Some(LogFormat::Pretty),
            _ => None,
        }
    }

    /// Resolve the format from an optional raw setting.
    ///
    /// Unset means JSON. An unrecognised value also means JSON, and is handed
    /// back so the caller can report it once logging is up.
    pub fn resolve(raw: Option<String>) -> (Self, Option<String>) {
        match raw {
            None => (LogFormat::default(), None),
            Some(value) => match Self::parse(&value) {
                Some(format) => (format, None),
                None => (LogFormat::default(), Some(value)),
            },
        }
    }

    pub fn from_env() -> (Self, Option<String>) {
        Self::resolve(std::env::var(LOG_FORMAT_ENV).ok())
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Timestamps + configurable filter via RUST_LOG.
    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
