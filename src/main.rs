//! airep-turbulence — Binary Entrypoint
//! Walks back over recent time windows, pulls aircraft reports from the
//! aviation weather data server and writes the turbulent ones to CSV.

use airep_turbulence::logging::init_tracing;
use airep_turbulence::{load_config_default, run_with_config};
use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; enables AIREP_CONFIG_PATH / RUST_LOG from it.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = load_config_default().context("loading harvest config")?;
    let summary = run_with_config(&cfg).await.map_err(|e| {
        tracing::error!(error = ?e, "harvest failed");
        e
    })?;

    info!(
        windows = summary.windows,
        reports = summary.reports,
        rows = summary.rows_written,
        warnings = summary.warnings,
        service_errors = summary.service_errors,
        duplicates = summary.duplicates,
        "harvest finished"
    );
    Ok(())
}
