// src/config/harvest.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ingest::providers::adds_http::DEFAULT_ENDPOINT;
use crate::window::{DEFAULT_ITERATIONS, DEFAULT_WINDOW_SECS, MAX_ITERATIONS};

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_window_secs() -> u32 {
    DEFAULT_WINDOW_SECS
}
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
fn default_output_path() -> PathBuf {
    PathBuf::from("turbulence_reports.csv")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Length of each time window in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
    /// Number of windows walked back from now. Capped at `MAX_ITERATIONS`.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// When set, every raw response is kept as its own file here.
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
    /// Per-request timeout; unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Skip rows already written earlier in the same run.
    #[serde(default)]
    pub dedup: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            window_secs: default_window_secs(),
            iterations: default_iterations(),
            output_path: default_output_path(),
            archive_dir: None,
            request_timeout_secs: None,
            dedup: false,
        }
    }
}

impl HarvestConfig {
    /// Reject unusable values, clamp the rest.
    pub fn sanitize(mut self) -> anyhow::Result<Self> {
        if self.window_secs == 0 {
            anyhow::bail!("window_secs must be greater than zero");
        }
        if self.endpoint.trim().is_empty() {
            anyhow::bail!("endpoint must not be empty");
        }
        if self.iterations > MAX_ITERATIONS {
            tracing::warn!(
                requested = self.iterations,
                max = MAX_ITERATIONS,
                "iterations capped"
            );
            self.iterations = MAX_ITERATIONS;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
