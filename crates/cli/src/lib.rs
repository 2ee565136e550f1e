//! `logiflow` command-line runner: load a batch file, run the pipeline,
//! print the MIS report.

pub mod batch;
pub mod config;

use anyhow::Context;

use logiflow_fulfillment::Pipeline;
use logiflow_report::MisReport;

pub use batch::BatchFile;
pub use config::{Config, ReportFormat};

/// Run one batch end to end and return the rendered report.
pub fn run(config: &Config) -> anyhow::Result<String> {
    let batch = batch::load(&config.batch_file)?;
    let input = batch
        .into_input()
        .with_context(|| format!("invalid opening stock in {}", config.batch_file.display()))?;

    let pipeline = Pipeline::new(config.pipeline);
    let outcome = pipeline
        .run(input)
        .with_context(|| format!("batch {} failed", pipeline.batch_id()))?;

    if !outcome.is_balanced() {
        tracing::error!(batch_id = %outcome.batch_id, "closing stock does not balance");
    }

    let report = MisReport::from_outcome(&outcome);
    let rendered = match config.report_format {
        ReportFormat::Text => report.to_string(),
        ReportFormat::Json => report.to_json().context("failed to serialize report")?,
    };
    Ok(rendered)
}
