// src/ingest/archive.rs
use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::window::TimeWindow;

pub trait ArchiveSink: Send + Sync {
    /// Keep a raw response body for the given window.
    fn store(&self, window: TimeWindow, body: &str) -> Result<()>;
}

/// Writes each body to its own file, named after the window bounds.
pub struct DirArchive {
    dir: PathBuf,
}

impl DirArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating archive dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, window: TimeWindow) -> PathBuf {
        self.dir.join(format!(
            "aircraftreports_{}_{}.xml",
            window.start, window.end
        ))
    }
}

impl ArchiveSink for DirArchive {
    fn store(&self, window: TimeWindow, body: &str) -> Result<()> {
        let path = self.path_for(window);
        std::fs::write(&path, body)
            .with_context(|| format!("archiving response to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "archived raw response");
        Ok(())
    }
}

// --- Test helper ---
pub struct MockSink {
    pub calls: std::sync::Mutex<Vec<(TimeWindow, String)>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink for MockSink {
    fn store(&self, window: TimeWindow, body: &str) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| anyhow::anyhow!("mock sink mutex poisoned"))?
            .push((window, body.to_string()));
        Ok(())
    }
}
