// src/ingest/providers/fixture.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Mutex;

use crate::ingest::types::ReportSource;
use crate::window::TimeWindow;

/// Serves the same body for every window and remembers which windows were asked for.
pub struct FixtureSource {
    body: String,
    requested: Mutex<Vec<TimeWindow>>,
}

impl FixtureSource {
    pub fn from_fixture(body: &str) -> Self {
        Self {
            body: body.to_string(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Ok(Self::from_fixture(&body))
    }

    pub fn requested(&self) -> Vec<TimeWindow> {
        self.requested
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReportSource for FixtureSource {
    async fn fetch(&self, window: TimeWindow) -> Result<String> {
        self.requested
            .lock()
            .map_err(|_| anyhow::anyhow!("fixture mutex poisoned"))?
            .push(window);
        Ok(self.body.clone())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
