// src/ingest/mod.rs
pub mod archive;
pub mod dedup;
pub mod normalize;
pub mod parser;
pub mod providers;
pub mod types;

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use std::io::Write;

use crate::csv_sink::ReportCsvWriter;
use crate::ingest::archive::ArchiveSink;
use crate::ingest::dedup::Deduplicator;
use crate::ingest::normalize::normalize_all;
use crate::ingest::types::{AircraftReport, ReportSource};
use crate::metrics::{
    ensure_metrics_described, DUPLICATES_TOTAL, PARSE_MS, REPORTS_TOTAL, ROWS_WRITTEN_TOTAL,
    SERVICE_ERRORS_TOTAL, SERVICE_WARNINGS_TOTAL, WINDOWS_TOTAL,
};
use crate::window::TimeWindow;

/// Parsed + normalized content of one response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowBatch {
    pub records: Vec<AircraftReport>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Parse a response body and normalize every report in it.
pub fn parse_and_normalize(body: &str) -> Result<WindowBatch> {
    let t0 = std::time::Instant::now();
    let resp = parser::parse_response(body)?;
    let records = normalize_all(&resp.reports);
    histogram!(PARSE_MS).record(t0.elapsed().as_secs_f64() * 1_000.0);
    Ok(WindowBatch {
        records,
        warnings: resp.warnings,
        errors: resp.errors,
    })
}

/// Counts for one window or, summed, for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub windows: usize,
    pub reports: usize,
    pub rows_written: usize,
    pub warnings: usize,
    pub service_errors: usize,
    pub duplicates: usize,
}

impl RunSummary {
    fn absorb(&mut self, other: RunSummary) {
        self.windows += other.windows;
        self.reports += other.reports;
        self.rows_written += other.rows_written;
        self.warnings += other.warnings;
        self.service_errors += other.service_errors;
        self.duplicates += other.duplicates;
    }
}

/// Sequential fetch -> parse -> normalize -> filter -> write loop.
pub struct Harvester<'a> {
    source: &'a dyn ReportSource,
    archive: Option<&'a dyn ArchiveSink>,
    dedup: Option<Deduplicator>,
}

impl<'a> Harvester<'a> {
    pub fn new(source: &'a dyn ReportSource) -> Self {
        Self {
            source,
            archive: None,
            dedup: None,
        }
    }

    pub fn with_archive(mut self, archive: &'a dyn ArchiveSink) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn with_dedup(mut self, enabled: bool) -> Self {
        self.dedup = enabled.then(Deduplicator::new);
        self
    }

    /// Process every window in order. The first fatal error stops the run;
    /// rows from windows already finished stay in the output.
    pub async fn run<W, I>(
        &mut self,
        windows: I,
        writer: &mut ReportCsvWriter<W>,
    ) -> Result<RunSummary>
    where
        W: Write,
        I: IntoIterator<Item = TimeWindow>,
    {
        ensure_metrics_described();
        let mut summary = RunSummary::default();
        for window in windows {
            let stats = self.run_window(window, writer).await.with_context(|| {
                format!("window {}..{} ({})", window.start, window.end, self.source.name())
            })?;
            summary.absorb(stats);
        }
        Ok(summary)
    }

    pub async fn run_window<W: Write>(
        &mut self,
        window: TimeWindow,
        writer: &mut ReportCsvWriter<W>,
    ) -> Result<RunSummary> {
        let body = self.source.fetch(window).await?;
        if let Some(archive) = self.archive {
            archive.store(window, &body)?;
        }

        let batch = parse_and_normalize(&body)?;
        for w in &batch.warnings {
            tracing::warn!(start = window.start, end = window.end, "service warning: {w}");
        }
        for e in &batch.errors {
            tracing::error!(start = window.start, end = window.end, "service error: {e}");
        }

        let report_count = batch.records.len();
        let mut duplicates = 0usize;
        // the writer drops records without intensity; dedup only tracks the rest
        let rows: Vec<AircraftReport> = match self.dedup.as_mut() {
            Some(seen) => batch
                .records
                .into_iter()
                .filter(|r| {
                    if !r.has_turbulence() || seen.insert(r) {
                        return true;
                    }
                    duplicates += 1;
                    false
                })
                .collect(),
            None => batch.records,
        };

        let written = writer.append(&rows)?;
        writer.flush()?;

        counter!(WINDOWS_TOTAL).increment(1);
        counter!(REPORTS_TOTAL).increment(report_count as u64);
        counter!(ROWS_WRITTEN_TOTAL).increment(written as u64);
        counter!(SERVICE_WARNINGS_TOTAL).increment(batch.warnings.len() as u64);
        counter!(SERVICE_ERRORS_TOTAL).increment(batch.errors.len() as u64);
        counter!(DUPLICATES_TOTAL).increment(duplicates as u64);

        tracing::info!(
            target: "ingest",
            start = window.start,
            end = window.end,
            reports = report_count,
            rows = written,
            warnings = batch.warnings.len(),
            "window done"
        );

        Ok(RunSummary {
            windows: 1,
            reports: report_count,
            rows_written: written,
            warnings: batch.warnings.len(),
            service_errors: batch.errors.len(),
            duplicates,
        })
    }
}
