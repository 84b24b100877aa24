//! Rule-table loading: CSV parsing, validation, and upsert-by-`rule_id`
//! into an immutable snapshot the engine evaluates against.

mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::advisor::domain::{Rule, RuleId, University, UniversityId};

use parser::{RuleRow, UniversityRow, REQUIRED_RULE_COLUMNS, REQUIRED_UNIVERSITY_COLUMNS};

/// Load-time failures. Invalid data never becomes part of a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read rule data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid csv data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{table} table is missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        table: &'static str,
        missing: Vec<String>,
    },
    #[error("record {record}: column {column} has invalid value '{value}'")]
    InvalidCell {
        record: String,
        column: &'static str,
        value: String,
    },
    #[error("rule {rule_id}: fit weight '{key}' does not name a gate condition")]
    UnknownWeightKey { rule_id: String, key: String },
    #[error("rule {rule_id}: unknown university reference '{university_id}'")]
    UnknownUniversity {
        rule_id: String,
        university_id: String,
    },
}

/// Immutable rule set plus university directory for one evaluation run.
///
/// Snapshots are never mutated after loading; replacing rule data means
/// loading a fresh snapshot and swapping the `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSnapshot {
    rules: BTreeMap<RuleId, Rule>,
    universities: BTreeMap<UniversityId, University>,
}

impl RuleSnapshot {
    /// Rules in ascending `rule_id` order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn rule(&self, rule_id: &RuleId) -> Option<&Rule> {
        self.rules.get(rule_id)
    }

    pub fn university(&self, university_id: &UniversityId) -> Option<&University> {
        self.universities.get(university_id)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn university_count(&self) -> usize {
        self.universities.len()
    }
}

/// Builds validated snapshots from tabular rule data.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn from_paths<P: AsRef<Path>>(
        rules_path: P,
        universities_path: P,
    ) -> Result<RuleSnapshot, SnapshotError> {
        let rules = std::fs::File::open(rules_path)?;
        let universities = std::fs::File::open(universities_path)?;
        Self::from_readers(rules, universities)
    }

    pub fn from_readers<R: Read, U: Read>(
        rules: R,
        universities: U,
    ) -> Result<RuleSnapshot, SnapshotError> {
        let universities = read_universities(universities)?;
        let rules = read_rules(rules, &universities)?;

        Ok(RuleSnapshot {
            rules,
            universities,
        })
    }
}

fn check_headers(
    headers: &csv::StringRecord,
    required: &[&str],
    table: &'static str,
) -> Result<(), SnapshotError> {
    let mut missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort_unstable();
        Err(SnapshotError::MissingColumns { table, missing })
    }
}

fn read_universities<R: Read>(
    reader: R,
) -> Result<BTreeMap<UniversityId, University>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    check_headers(
        csv_reader.headers()?,
        REQUIRED_UNIVERSITY_COLUMNS,
        "university",
    )?;

    let mut universities = BTreeMap::new();
    for record in csv_reader.deserialize::<UniversityRow>() {
        let university = record?.into_university()?;
        universities.insert(university.university_id.clone(), university);
    }

    Ok(universities)
}

fn read_rules<R: Read>(
    reader: R,
    universities: &BTreeMap<UniversityId, University>,
) -> Result<BTreeMap<RuleId, Rule>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    check_headers(csv_reader.headers()?, REQUIRED_RULE_COLUMNS, "rule")?;

    let mut rules: BTreeMap<RuleId, Rule> = BTreeMap::new();
    let mut replaced = 0_usize;

    for record in csv_reader.deserialize::<RuleRow>() {
        let rule = record?.into_rule()?;
        for reference in &rule.universities {
            if !universities.contains_key(reference) {
                return Err(SnapshotError::UnknownUniversity {
                    rule_id: rule.rule_id.0.clone(),
                    university_id: reference.0.clone(),
                });
            }
        }
        if rules.insert(rule.rule_id.clone(), rule).is_some() {
            replaced += 1;
        }
    }

    if replaced > 0 {
        debug!(replaced, "rule table contained duplicate rule ids; last definition kept");
    }

    Ok(rules)
}
