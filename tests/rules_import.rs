use std::io::Cursor;

use pathway_advisor::advisor::{Enforcement, SnapshotError, SnapshotLoader};

const RULES_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/rules.sample.csv");
const UNIVERSITIES_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/universities.sample.csv");

#[test]
fn sample_fixtures_load_into_a_snapshot() {
    let snapshot =
        SnapshotLoader::from_paths(RULES_CSV, UNIVERSITIES_CSV).expect("fixtures load");

    assert_eq!(snapshot.rule_count(), 22);
    assert_eq!(snapshot.university_count(), 10);
}

#[test]
fn every_rule_reference_resolves_in_the_directory() {
    let snapshot =
        SnapshotLoader::from_paths(RULES_CSV, UNIVERSITIES_CSV).expect("fixtures load");

    for rule in snapshot.rules() {
        for reference in &rule.universities {
            assert!(
                snapshot.university(reference).is_some(),
                "rule {} references unknown university {}",
                rule.rule_id.0,
                reference.0
            );
        }
    }
}

#[test]
fn sample_rules_carry_required_and_advisory_conditions() {
    let snapshot =
        SnapshotLoader::from_paths(RULES_CSV, UNIVERSITIES_CSV).expect("fixtures load");

    let mut required = 0;
    let mut advisory = 0;
    for rule in snapshot.rules() {
        for condition in &rule.conditions {
            match condition.enforcement {
                Enforcement::Required => required += 1,
                Enforcement::Advisory => advisory += 1,
            }
        }
    }

    assert!(required > 0);
    assert!(advisory > 0);
}

#[test]
fn reloading_with_a_duplicate_rule_id_upserts() {
    let mut rules_text = std::fs::read_to_string(RULES_CSV).expect("rule fixture reads");
    rules_text.push_str(
        "SEC-GAP-BRIDGE-01,Revised Bridging Programme,low,9,secondary,developing,,,,,,,,,,,,,academic:1,metro-tech\n",
    );
    let universities_text =
        std::fs::read_to_string(UNIVERSITIES_CSV).expect("university fixture reads");

    let snapshot = SnapshotLoader::from_readers(
        Cursor::new(rules_text),
        Cursor::new(universities_text),
    )
    .expect("snapshot loads despite the duplicate");

    assert_eq!(snapshot.rule_count(), 22);
    let bridged = snapshot
        .rules()
        .find(|rule| rule.rule_id.0 == "SEC-GAP-BRIDGE-01")
        .expect("rule present");
    assert_eq!(bridged.pathway_name, "Revised Bridging Programme");
    assert_eq!(bridged.priority, 9);
}

#[test]
fn missing_rule_file_propagates_an_io_error() {
    let error = SnapshotLoader::from_paths("./does-not-exist.csv", UNIVERSITIES_CSV)
        .expect_err("expected io error");

    match error {
        SnapshotError::Io(_) => {}
        other => panic!("expected io error, got {other:?}"),
    }
}
