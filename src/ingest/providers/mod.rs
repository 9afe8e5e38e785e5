// src/ingest/providers/mod.rs
pub mod adds_http;
pub mod fixture;
