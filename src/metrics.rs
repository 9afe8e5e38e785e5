// src/metrics.rs
//! Metric names used by the harvest pipeline. A recorder is optional: without one
//! installed the `metrics` macros are no-ops.

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

pub const WINDOWS_TOTAL: &str = "airep_windows_total";
pub const REPORTS_TOTAL: &str = "airep_reports_total";
pub const ROWS_WRITTEN_TOTAL: &str = "airep_rows_written_total";
pub const SERVICE_WARNINGS_TOTAL: &str = "airep_service_warnings_total";
pub const SERVICE_ERRORS_TOTAL: &str = "airep_service_errors_total";
pub const DUPLICATES_TOTAL: &str = "airep_duplicates_total";
pub const PROVIDER_ERRORS_TOTAL: &str = "airep_provider_errors_total";
pub const PARSE_MS: &str = "airep_parse_ms";

/// One-time metrics registration (so series carry descriptions once a recorder exists).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(WINDOWS_TOTAL, "Time windows fetched and processed.");
        describe_counter!(REPORTS_TOTAL, "Aircraft reports parsed from responses.");
        describe_counter!(ROWS_WRITTEN_TOTAL, "Turbulence rows appended to the CSV.");
        describe_counter!(
            SERVICE_WARNINGS_TOTAL,
            "Warnings reported by the data service."
        );
        describe_counter!(SERVICE_ERRORS_TOTAL, "Errors reported by the data service.");
        describe_counter!(
            DUPLICATES_TOTAL,
            "Turbulence rows skipped as duplicates (dedup enabled only)."
        );
        describe_counter!(PROVIDER_ERRORS_TOTAL, "Provider fetch errors.");
        describe_histogram!(PARSE_MS, "Response parse time in milliseconds.");
    });
}
