// src/csv_sink.rs
//! Turbulence CSV output: one header, then one row per turbulent report.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::ingest::types::AircraftReport;

pub const CSV_HEADER: [&str; 6] = [
    "observation_time",
    "aircraft_ref",
    "latitude",
    "longitude",
    "altitude_ft_msl",
    "turbulence_intensity",
];

pub struct ReportCsvWriter<W: Write> {
    inner: csv::Writer<W>,
    rows: usize,
}

impl ReportCsvWriter<File> {
    /// Truncates any existing file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("creating output csv {}", path.display()))?;
        Self::from_writer(file)
    }
}

impl<W: Write> ReportCsvWriter<W> {
    pub fn from_writer(w: W) -> Result<Self> {
        // header is written by hand so an empty run still produces it
        let mut inner = csv::WriterBuilder::new().has_headers(false).from_writer(w);
        inner.write_record(CSV_HEADER).context("writing csv header")?;
        inner.flush().context("flushing csv header")?;
        Ok(Self { inner, rows: 0 })
    }

    /// Appends the records that carry a turbulence intensity. Returns rows written.
    pub fn append(&mut self, records: &[AircraftReport]) -> Result<usize> {
        let mut written = 0;
        for r in records.iter().filter(|r| r.has_turbulence()) {
            self.inner.serialize(r).context("writing csv row")?;
            written += 1;
        }
        self.rows += written;
        Ok(written)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().context("flushing csv output")
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| anyhow!("flushing csv writer: {}", e.error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ac: &str, intensity: &str) -> AircraftReport {
        AircraftReport {
            observation_time: "2024-03-01T12:00:00Z".into(),
            aircraft_ref: ac.into(),
            latitude: "39.5".into(),
            longitude: "-104.7".into(),
            altitude_ft_msl: "35000".into(),
            turbulence_intensity: intensity.into(),
        }
    }

    #[test]
    fn header_only_when_nothing_qualifies() {
        let mut w = ReportCsvWriter::from_writer(Vec::new()).unwrap();
        assert_eq!(w.append(&[rec("B738", "")]).unwrap(), 0);
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "observation_time,aircraft_ref,latitude,longitude,altitude_ft_msl,turbulence_intensity\n"
        );
    }

    #[test]
    fn writes_only_turbulent_rows_in_order() {
        let mut w = ReportCsvWriter::from_writer(Vec::new()).unwrap();
        let n = w
            .append(&[rec("A", "LGT"), rec("B", ""), rec("C", "SEV")])
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(w.rows_written(), 2);
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2024-03-01T12:00:00Z,A,39.5,-104.7,35000,LGT");
        assert_eq!(lines[2], "2024-03-01T12:00:00Z,C,39.5,-104.7,35000,SEV");
    }

    #[test]
    fn embedded_delimiters_are_quoted() {
        let mut w = ReportCsvWriter::from_writer(Vec::new()).unwrap();
        w.append(&[rec("B7,38", "LGT-MOD")]).unwrap();
        let out = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert!(out.contains("\"B7,38\""));
    }
}
