//! Export tests: JSON dump and candidate CSV.

use qfolio_core::{
    engine::{DashboardInputs, SimEngine},
    export::{self, CANDIDATE_CSV_HEADER},
    selector::Candidate,
    snapshot::ResultSet,
    types::{ComplianceTag, Seed},
};

fn results() -> ResultSet {
    SimEngine::new(Seed(42)).run(&DashboardInputs::default())
}

#[test]
fn csv_has_header_and_one_row_per_candidate() {
    let r = results();
    let csv = export::candidates_csv(&r.candidates);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], CANDIDATE_CSV_HEADER);
    assert_eq!(lines.len(), r.candidates.len() + 1);
    for (line, c) in lines[1..].iter().zip(&r.candidates) {
        assert!(line.starts_with(&c.bits), "row {line} should start with {}", c.bits);
        assert!(line.ends_with(c.compliance.label()), "row {line}");
    }
}

#[test]
fn csv_quotes_awkward_fields() {
    let candidate = Candidate {
        bits: "1,0\"1".into(),
        probability: 0.5,
        expected_return: 0.09,
        risk: 0.1,
        compliance: ComplianceTag::EsgExcluded,
    };
    let csv = export::candidates_csv(&[candidate]);
    let row = csv.lines().nth(1).expect("one row");
    assert_eq!(row, "\"1,0\"\"1\",0.5,0.09,0.1,ESG excluded");
}

#[test]
fn json_round_trips_the_result_set() {
    let r = results();
    let json = export::to_json(&r).expect("to json");
    for key in ["\"frontier\"", "\"ratios\"", "\"candidates\"", "\"allocation\"", "\"ruin_line\"", "\"insights\""] {
        assert!(json.contains(key), "missing {key}");
    }
    let back: ResultSet = serde_json::from_str(&json).expect("parse back");
    assert_eq!(back, r);
}

#[test]
fn exports_write_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let r = results();

    let json_path = dir.path().join("run.json");
    export::write_json(&r, &json_path).expect("write json");
    let written = std::fs::read_to_string(&json_path).expect("read json");
    assert_eq!(written, export::to_json(&r).expect("to json"));

    let csv_path = dir.path().join("top.csv");
    export::write_candidates_csv(&r.candidates, &csv_path).expect("write csv");
    let written = std::fs::read_to_string(&csv_path).expect("read csv");
    assert!(written.starts_with(CANDIDATE_CSV_HEADER));
}

#[test]
fn unwritable_path_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad = dir.path().join("missing-dir").join("run.json");
    let err = export::write_json(&results(), &bad).unwrap_err();
    assert!(matches!(err, qfolio_core::error::SimError::Io(_)), "got {err:?}");
}
