// tests/ingest_parser.rs
use airep_turbulence::ingest::normalize::{normalize_all, normalize_report};
use airep_turbulence::ingest::parser::parse_response;
use airep_turbulence::AircraftReport;

const REPORTS_XML: &str = include_str!("fixtures/aircraftreports.xml");
const WARNINGS_XML: &str = include_str!("fixtures/warnings_only.xml");

#[test]
fn fixture_yields_three_reports_without_warnings() {
    let resp = parse_response(REPORTS_XML).expect("fixture parses");
    assert_eq!(resp.reports.len(), 3);
    assert!(resp.warnings.is_empty());
    assert!(resp.errors.is_empty());
}

#[test]
fn full_report_round_trips_all_six_fields() {
    let resp = parse_response(REPORTS_XML).unwrap();
    let rec = normalize_report(&resp.reports[0]);
    assert_eq!(
        rec,
        AircraftReport {
            observation_time: "2024-03-01T12:05:00Z".into(),
            aircraft_ref: "B738".into(),
            latitude: "39.87".into(),
            longitude: "-104.67".into(),
            altitude_ft_msl: "35000".into(),
            turbulence_intensity: "LGT".into(),
        }
    );
}

#[test]
fn intensity_comes_from_turbulence_condition_only() {
    let resp = parse_response(REPORTS_XML).unwrap();
    let recs = normalize_all(&resp.reports);
    let got: Vec<&str> = recs
        .iter()
        .map(|r| r.turbulence_intensity.as_str())
        .collect();
    // second report only carries icing
    assert_eq!(got, vec!["LGT", "", "SEV"]);
}

#[test]
fn warnings_only_response_has_no_reports() {
    let resp = parse_response(WARNINGS_XML).unwrap();
    assert!(resp.reports.is_empty());
    assert_eq!(
        resp.warnings,
        vec!["Query results have been truncated to 1000 results".to_string()]
    );
}

#[test]
fn values_are_kept_verbatim() {
    let xml = "<response><data><AircraftReport>\
               <latitude> 39.870 </latitude><altitude_ft_msl>FL350</altitude_ft_msl>\
               <aircraft_ref> B738 </aircraft_ref>\
               <turbulence_condition turbulence_intensity=\"LGT-MOD\"/>\
               </AircraftReport></data></response>";
    let resp = parse_response(xml).unwrap();
    let rec = normalize_report(&resp.reports[0]);
    // no trimming, no numeric coercion
    assert_eq!(rec.latitude, " 39.870 ");
    assert_eq!(rec.aircraft_ref, " B738 ");
    assert_eq!(rec.altitude_ft_msl, "FL350");
    assert_eq!(rec.turbulence_intensity, "LGT-MOD");
    assert_eq!(rec.observation_time, "");
}
