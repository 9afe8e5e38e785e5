// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::window::TimeWindow;

/// One child element of an `AircraftReport`: its text plus attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

/// Field name -> element, for a single `AircraftReport`. Repeated names keep the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReport {
    pub fields: HashMap<String, RawElement>,
}

impl RawReport {
    pub fn insert(&mut self, name: impl Into<String>, element: RawElement) {
        self.fields.insert(name.into(), element);
    }

    pub fn get(&self, name: &str) -> Option<&RawElement> {
        self.fields.get(name)
    }

    /// Text of `name` (or its `attribute` when given), falling back to `default`.
    pub fn field(&self, name: &str, attribute: Option<&str>, default: &str) -> String {
        let value = match (self.fields.get(name), attribute) {
            (Some(el), None) => Some(el.text.as_str()),
            (Some(el), Some(attr)) => el.attributes.get(attr).map(String::as_str),
            (None, _) => None,
        };
        value.unwrap_or(default).to_string()
    }
}

/// Everything one service response carries that we care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceResponse {
    pub reports: Vec<RawReport>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Normalized turbulence record. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AircraftReport {
    pub observation_time: String,
    pub aircraft_ref: String,
    pub latitude: String,
    pub longitude: String,
    pub altitude_ft_msl: String,
    pub turbulence_intensity: String,
}

impl AircraftReport {
    pub fn has_turbulence(&self) -> bool {
        !self.turbulence_intensity.is_empty()
    }
}

/// Where raw response bodies come from, one request per window.
#[async_trait::async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, window: TimeWindow) -> Result<String>;
    fn name(&self) -> &'static str;
}
