// src/ingest/dedup.rs
//! Opt-in duplicate suppression across windows of one run.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::ingest::types::AircraftReport;

pub fn fingerprint(r: &AircraftReport) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in [
        &r.observation_time,
        &r.aircraft_ref,
        &r.latitude,
        &r.longitude,
        &r.altitude_ft_msl,
        &r.turbulence_intensity,
    ] {
        hasher.update(part.as_bytes());
        // unit separator keeps ("ab","c") apart from ("a","bc")
        hasher.update([0x1f_u8]);
    }
    hasher.finalize().into()
}

#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<[u8; 32]>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the record has not been seen before in this run.
    pub fn insert(&mut self, r: &AircraftReport) -> bool {
        self.seen.insert(fingerprint(r))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
