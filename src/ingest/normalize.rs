// src/ingest/normalize.rs
use crate::ingest::types::{AircraftReport, RawReport};

/// Build the fixed-shape record. Every missing field becomes "".
pub fn normalize_report(raw: &RawReport) -> AircraftReport {
    AircraftReport {
        observation_time: raw.field("observation_time", None, ""),
        aircraft_ref: raw.field("aircraft_ref", None, ""),
        latitude: raw.field("latitude", None, ""),
        longitude: raw.field("longitude", None, ""),
        altitude_ft_msl: raw.field("altitude_ft_msl", None, ""),
        turbulence_intensity: raw.field("turbulence_condition", Some("turbulence_intensity"), ""),
    }
}

pub fn normalize_all(raw: &[RawReport]) -> Vec<AircraftReport> {
    raw.iter().map(normalize_report).collect()
}
