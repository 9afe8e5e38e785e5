// src/ingest/providers/adds_http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use std::time::Duration;

use crate::ingest::types::ReportSource;
use crate::metrics::PROVIDER_ERRORS_TOTAL;
use crate::window::TimeWindow;

/// aviationweather.gov ADDS data server, parameter interface.
pub const DEFAULT_ENDPOINT: &str = "https://aviationweather.gov/adds/dataserver_current/httpparam";

/// Retrieves aircraft reports (PIREP/AIREP) as XML, one GET per window. No retries.
pub struct AddsHttpSource {
    endpoint: String,
    client: Client,
}

impl AddsHttpSource {
    /// `timeout: None` leaves requests unbounded.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("building adds http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn query_params(window: TimeWindow) -> [(&'static str, String); 5] {
        [
            ("dataSource", "aircraftreports".to_string()),
            ("requestType", "retrieve".to_string()),
            ("format", "xml".to_string()),
            ("startTime", window.start.to_string()),
            ("endTime", window.end.to_string()),
        ]
    }
}

#[async_trait]
impl ReportSource for AddsHttpSource {
    async fn fetch(&self, window: TimeWindow) -> Result<String> {
        tracing::debug!(
            endpoint = %self.endpoint,
            start = window.start,
            end = window.end,
            "requesting aircraft reports"
        );
        let resp = match self
            .client
            .get(&self.endpoint)
            .query(&Self::query_params(window))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = ?e, provider = "adds", "provider http error");
                counter!(PROVIDER_ERRORS_TOTAL).increment(1);
                return Err(e).context("adds http get()");
            }
        };
        let body = resp
            .error_for_status()
            .context("adds non-2xx")?
            .text()
            .await
            .context("adds http .text()")?;
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "adds"
    }
}
