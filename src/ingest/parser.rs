// src/ingest/parser.rs
//! Flattens an ADDS data server XML response into raw reports and messages.
//!
//! Expected shape (only the parts we read):
//! ```text
//! <response>
//!   <errors><error>..</error></errors>
//!   <warnings><warning>..</warning></warnings>
//!   <data num_results="..">
//!     <AircraftReport>
//!       <observation_time>..</observation_time>
//!       <turbulence_condition turbulence_intensity=".." />
//!       ...
//!     </AircraftReport>
//!   </data>
//! </response>
//! ```
//! Missing `errors`, `warnings` or `data` sections simply yield empty lists.

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

use crate::ingest::types::{RawElement, RawReport, ServiceResponse};

const DATA: &str = "data";
const REPORT: &str = "AircraftReport";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Warning,
    Error,
}

#[derive(Default)]
struct Collector {
    out: ServiceResponse,
    report: Option<RawReport>,
    field: Option<(String, RawElement)>,
    message: Option<(MessageKind, String)>,
    // set once the open field or message has seen a child element
    text_sealed: bool,
}

impl Collector {
    /// `parents` is the open-element path above `name`, root first.
    fn open(&mut self, parents: &[String], name: &str, attributes: BTreeMap<String, String>) {
        let inside_field = parents.len() == 4 && self.field.is_some();
        let inside_message = parents.len() == 3 && self.message.is_some();
        if inside_field || inside_message {
            self.text_sealed = true;
            return;
        }
        match parents {
            [_, section] if section == DATA && name == REPORT => {
                self.report = Some(RawReport::default());
            }
            [_, section, report] if section == DATA && report == REPORT => {
                if self.report.is_some() {
                    self.text_sealed = false;
                    self.field = Some((
                        name.to_string(),
                        RawElement {
                            text: String::new(),
                            attributes,
                        },
                    ));
                }
            }
            [_, section] if section == "warnings" && name == "warning" => {
                self.text_sealed = false;
                self.message = Some((MessageKind::Warning, String::new()));
            }
            [_, section] if section == "errors" && name == "error" => {
                self.text_sealed = false;
                self.message = Some((MessageKind::Error, String::new()));
            }
            _ => {}
        }
    }

    /// Text only counts when it sits directly inside a report field or a message,
    /// before any nested child element.
    fn text(&mut self, depth: usize, s: &str) {
        if self.text_sealed {
            return;
        }
        if depth == 4 {
            if let Some((_, el)) = self.field.as_mut() {
                el.text.push_str(s);
            }
        } else if depth == 3 {
            if let Some((_, msg)) = self.message.as_mut() {
                msg.push_str(s);
            }
        }
    }

    fn close(&mut self, parents: &[String], name: &str) {
        match parents.len() {
            3 => {
                if let (Some((field_name, el)), Some(report)) =
                    (self.field.take(), self.report.as_mut())
                {
                    report.insert(field_name, el);
                }
            }
            2 if name == REPORT && parents[1] == DATA => {
                if let Some(report) = self.report.take() {
                    self.out.reports.push(report);
                }
            }
            2 => match self.message.take() {
                Some((MessageKind::Warning, msg)) => self.out.warnings.push(msg),
                Some((MessageKind::Error, msg)) => self.out.errors.push(msg),
                None => {}
            },
            _ => {}
        }
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn element_attributes(e: &BytesStart<'_>) -> Result<BTreeMap<String, String>> {
    let mut attrs = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.context("malformed xml attribute")?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .with_context(|| format!("unescaping attribute {key}"))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Parse a full response body.
pub fn parse_response(xml: &str) -> Result<ServiceResponse> {
    let mut reader = Reader::from_str(xml);

    let mut path: Vec<String> = Vec::new();
    let mut collector = Collector::default();
    let mut saw_root = false;

    loop {
        match reader
            .read_event()
            .with_context(|| format!("parsing aircraft report xml at byte {}", reader.buffer_position()))?
        {
            Event::Start(e) => {
                saw_root = true;
                let name = element_name(&e);
                collector.open(&path, &name, element_attributes(&e)?);
                path.push(name);
            }
            Event::Empty(e) => {
                saw_root = true;
                let name = element_name(&e);
                collector.open(&path, &name, element_attributes(&e)?);
                collector.close(&path, &name);
            }
            Event::Text(t) => {
                let s = t.unescape().context("unescaping xml text")?;
                collector.text(path.len(), &s);
            }
            Event::CData(c) => {
                let s = String::from_utf8_lossy(&c).into_owned();
                collector.text(path.len(), &s);
            }
            Event::End(_) => {
                if let Some(name) = path.pop() {
                    collector.close(&path, &name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        bail!("response has no root element");
    }
    if let Some(open) = path.last() {
        bail!("response ended inside <{open}>");
    }

    Ok(collector.out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_report_fields_and_attributes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
  <data num_results="1">
    <AircraftReport>
      <aircraft_ref>B738</aircraft_ref>
      <turbulence_condition turbulence_type="CHOP" turbulence_intensity="MOD"/>
    </AircraftReport>
  </data>
</response>"#;
        let resp = parse_response(xml).unwrap();
        assert_eq!(resp.reports.len(), 1);
        let r = &resp.reports[0];
        assert_eq!(r.get("aircraft_ref").unwrap().text, "B738");
        let turb = r.get("turbulence_condition").unwrap();
        assert_eq!(turb.text, "");
        assert_eq!(turb.attributes.get("turbulence_intensity").unwrap(), "MOD");
        assert!(resp.warnings.is_empty());
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn missing_warnings_section_is_tolerated() {
        let xml = "<response><data num_results=\"0\"></data></response>";
        let resp = parse_response(xml).unwrap();
        assert!(resp.reports.is_empty());
        assert!(resp.warnings.is_empty());
    }

    #[test]
    fn collects_warnings_and_errors() {
        let xml = "<response><errors><error>bad time</error></errors>\
                   <warnings><warning>truncated &amp; capped</warning></warnings>\
                   <data/></response>";
        let resp = parse_response(xml).unwrap();
        assert_eq!(resp.warnings, vec!["truncated & capped".to_string()]);
        assert_eq!(resp.errors, vec!["bad time".to_string()]);
    }

    #[test]
    fn ignores_reports_outside_data() {
        let xml = "<response><other><AircraftReport><aircraft_ref>X</aircraft_ref>\
                   </AircraftReport></other></response>";
        assert!(parse_response(xml).unwrap().reports.is_empty());
    }

    #[test]
    fn repeated_field_keeps_last() {
        let xml = "<response><data><AircraftReport>\
                   <sky_condition sky_cover=\"FEW\"/><sky_condition sky_cover=\"OVC\"/>\
                   </AircraftReport></data></response>";
        let resp = parse_response(xml).unwrap();
        assert_eq!(
            resp.reports[0].field("sky_condition", Some("sky_cover"), ""),
            "OVC"
        );
    }

    #[test]
    fn field_text_is_not_trimmed() {
        let xml = "<response><data><AircraftReport>\
                   <latitude> 39.870 </latitude><aircraft_ref>\tB738\n</aircraft_ref>\
                   </AircraftReport></data></response>";
        let resp = parse_response(xml).unwrap();
        assert_eq!(resp.reports[0].field("latitude", None, ""), " 39.870 ");
        assert_eq!(resp.reports[0].field("aircraft_ref", None, ""), "\tB738\n");
    }

    #[test]
    fn text_after_nested_child_is_dropped() {
        let xml = "<response><warnings><warning>cut<b>bold</b> tail</warning></warnings>\
                   <data><AircraftReport>\
                   <aircraft_ref>B7<x/>38</aircraft_ref>\
                   <latitude>40.1<unit>deg</unit>5</latitude>\
                   <longitude>-75.3</longitude>\
                   </AircraftReport></data></response>";
        let resp = parse_response(xml).unwrap();
        let r = &resp.reports[0];
        assert_eq!(r.field("aircraft_ref", None, ""), "B7");
        assert_eq!(r.field("latitude", None, ""), "40.1");
        assert_eq!(r.field("longitude", None, ""), "-75.3");
        assert_eq!(resp.warnings, vec!["cut".to_string()]);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_response("<response><data></response>").is_err());
        assert!(parse_response("<response><data>").is_err());
        assert!(parse_response("").is_err());
    }
}
