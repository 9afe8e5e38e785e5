// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod csv_sink;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod window;

// ---- Re-exports for stable public API ----
pub use crate::config::{load_config_default, HarvestConfig};
pub use crate::csv_sink::{ReportCsvWriter, CSV_HEADER};
pub use crate::ingest::types::{AircraftReport, ReportSource};
pub use crate::ingest::{Harvester, RunSummary};
pub use crate::window::{TimeWindow, TimeWindows};

use anyhow::{Context, Result};
use tracing::info;

use crate::ingest::archive::DirArchive;
use crate::ingest::providers::adds_http::AddsHttpSource;

/// Full run against the live data server as described by `cfg`.
pub async fn run_with_config(cfg: &HarvestConfig) -> Result<RunSummary> {
    let source = AddsHttpSource::new(cfg.endpoint.clone(), cfg.request_timeout())?;
    let archive = cfg.archive_dir.as_ref().map(DirArchive::new).transpose()?;
    let mut writer = ReportCsvWriter::create(&cfg.output_path)?;

    info!(
        endpoint = %cfg.endpoint,
        window_secs = cfg.window_secs,
        iterations = cfg.iterations,
        output = %cfg.output_path.display(),
        dedup = cfg.dedup,
        "harvest starting"
    );

    let mut harvester = Harvester::new(&source).with_dedup(cfg.dedup);
    if let Some(a) = archive.as_ref() {
        harvester = harvester.with_archive(a);
    }

    let windows = TimeWindows::ending_now(cfg.window_secs, cfg.iterations);
    let summary = harvester
        .run(windows, &mut writer)
        .await
        .context("harvest aborted")?;
    writer.flush()?;
    Ok(summary)
}
