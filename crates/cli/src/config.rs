//! Runtime configuration from the environment and command line.

use std::path::PathBuf;

use anyhow::{Context, bail};

use logiflow_fulfillment::{OverReturnPolicy, PipelineConfig};

pub const BATCH_FILE_ENV: &str = "LOGIFLOW_BATCH_FILE";
pub const REPORT_FORMAT_ENV: &str = "LOGIFLOW_REPORT_FORMAT";
pub const OVER_RETURN_ENV: &str = "LOGIFLOW_OVER_RETURN";

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub batch_file: PathBuf,
    pub report_format: ReportFormat,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Read configuration from the process environment and arguments.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// The first positional argument wins over `LOGIFLOW_BATCH_FILE`.
    pub fn from_sources<F, I>(var: F, args: I) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let batch_file = match args.into_iter().next().or_else(|| var(BATCH_FILE_ENV)) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => bail!("no batch file given (pass a path or set {BATCH_FILE_ENV})"),
        };

        let report_format = match var(REPORT_FORMAT_ENV) {
            None => ReportFormat::default(),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "text" => ReportFormat::Text,
                "json" => ReportFormat::Json,
                other => {
                    tracing::warn!(value = other, "unknown report format; using text");
                    ReportFormat::Text
                }
            },
        };

        let over_return = match var(OVER_RETURN_ENV) {
            None => OverReturnPolicy::default(),
            Some(value) => value
                .parse::<OverReturnPolicy>()
                .with_context(|| format!("invalid {OVER_RETURN_ENV}"))?,
        };

        Ok(Self {
            batch_file,
            report_format,
            pipeline: PipelineConfig { over_return },
        })
    }
}
