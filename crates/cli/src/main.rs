use std::io::Write;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    if let Some(value) = logiflow_observability::init() {
        tracing::warn!(
            value = %value,
            env = logiflow_observability::tracing::LOG_FORMAT_ENV,
            "unknown log format, using json"
        );
    }

    let config = logiflow_cli::Config::from_env()?;
    tracing::info!(batch_file = %config.batch_file.display(), "loading batch");

    let report = logiflow_cli::run(&config)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("failed to write report")?;
    if !report.ends_with('\n') {
        writeln!(stdout).context("failed to write report")?;
    }
    Ok(())
}
