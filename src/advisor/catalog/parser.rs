use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer};

use super::SnapshotError;
use crate::advisor::domain::{
    normalize_tag, AcademicBand, BudgetBand, ConditionCheck, Enforcement, GateCondition,
    IntakeTimeframe, LanguageProficiency, ProfileField, Rule, RuleId, Selectivity, StudyStage,
    University, UniversityId,
};

/// Ordinal distance that still counts as a borderline near-miss.
const ADJACENT_RANK_TOLERANCE: u8 = 1;

pub(super) const REQUIRED_RULE_COLUMNS: &[&str] = &[
    "rule_id",
    "pathway_name",
    "selectivity",
    "priority",
    "study_stage",
    "academic_min",
    "academic_required",
    "budget_min",
    "budget_max",
    "budget_required",
    "language_min",
    "language_required",
    "intake_min",
    "intake_required",
    "interest_tags",
    "interest_required",
    "documents_min",
    "documents_required",
    "fit_weights",
    "universities",
];

pub(super) const REQUIRED_UNIVERSITY_COLUMNS: &[&str] = &["university_id", "name", "country"];

#[derive(Debug, Deserialize)]
pub(super) struct RuleRow {
    rule_id: String,
    pathway_name: String,
    selectivity: String,
    priority: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    study_stage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    academic_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    academic_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    language_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    language_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    intake_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    intake_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interest_tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interest_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    documents_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    documents_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fit_weights: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    universities: Option<String>,
}

impl RuleRow {
    /// Translates one validated CSV record into a typed rule.
    pub(super) fn into_rule(self) -> Result<Rule, SnapshotError> {
        let rule_id = self.rule_id.trim().to_string();
        if rule_id.is_empty() {
            return Err(SnapshotError::InvalidCell {
                record: "<unnamed>".to_string(),
                column: "rule_id",
                value: self.rule_id,
            });
        }

        let invalid = |column: &'static str, value: &str| SnapshotError::InvalidCell {
            record: rule_id.clone(),
            column,
            value: value.to_string(),
        };

        let selectivity = Selectivity::parse(&self.selectivity)
            .ok_or_else(|| invalid("selectivity", &self.selectivity))?;
        let priority: i32 = self
            .priority
            .trim()
            .parse()
            .map_err(|_| invalid("priority", &self.priority))?;

        let mut conditions = Vec::new();

        if let Some(raw) = &self.study_stage {
            let stage = StudyStage::parse(raw).ok_or_else(|| invalid("study_stage", raw))?;
            conditions.push(GateCondition {
                id: "stage".to_string(),
                description: format!("study stage is {}", stage.label()),
                field: ProfileField::Stage,
                check: ConditionCheck::Equals {
                    expected: stage.rank(),
                },
                enforcement: Enforcement::Required,
            });
        }

        if let Some(raw) = &self.academic_min {
            let band = AcademicBand::parse(raw).ok_or_else(|| invalid("academic_min", raw))?;
            conditions.push(GateCondition {
                id: "academic".to_string(),
                description: format!("academic result at least {}", band.label()),
                field: ProfileField::Academic,
                check: ConditionCheck::AtLeast {
                    minimum: band.rank(),
                    tolerance: ADJACENT_RANK_TOLERANCE,
                },
                enforcement: enforcement_flag(&self.academic_required),
            });
        }

        match (&self.budget_min, &self.budget_max) {
            (Some(raw_min), Some(raw_max)) => {
                let min = BudgetBand::parse(raw_min).ok_or_else(|| invalid("budget_min", raw_min))?;
                let max = BudgetBand::parse(raw_max).ok_or_else(|| invalid("budget_max", raw_max))?;
                if max.rank() < min.rank() {
                    return Err(invalid("budget_max", raw_max));
                }
                conditions.push(GateCondition {
                    id: "budget".to_string(),
                    description: format!("budget between {} and {}", min.label(), max.label()),
                    field: ProfileField::Budget,
                    check: ConditionCheck::Within {
                        min: min.rank(),
                        max: max.rank(),
                        tolerance: ADJACENT_RANK_TOLERANCE,
                    },
                    enforcement: enforcement_flag(&self.budget_required),
                });
            }
            (Some(raw_min), None) => {
                let min = BudgetBand::parse(raw_min).ok_or_else(|| invalid("budget_min", raw_min))?;
                conditions.push(GateCondition {
                    id: "budget".to_string(),
                    description: format!("budget at least {}", min.label()),
                    field: ProfileField::Budget,
                    check: ConditionCheck::AtLeast {
                        minimum: min.rank(),
                        tolerance: ADJACENT_RANK_TOLERANCE,
                    },
                    enforcement: enforcement_flag(&self.budget_required),
                });
            }
            (None, Some(raw_max)) => {
                let max = BudgetBand::parse(raw_max).ok_or_else(|| invalid("budget_max", raw_max))?;
                conditions.push(GateCondition {
                    id: "budget".to_string(),
                    description: format!("budget at most {}", max.label()),
                    field: ProfileField::Budget,
                    check: ConditionCheck::Within {
                        min: 0,
                        max: max.rank(),
                        tolerance: ADJACENT_RANK_TOLERANCE,
                    },
                    enforcement: enforcement_flag(&self.budget_required),
                });
            }
            (None, None) => {}
        }

        if let Some(raw) = &self.language_min {
            let level =
                LanguageProficiency::parse(raw).ok_or_else(|| invalid("language_min", raw))?;
            conditions.push(GateCondition {
                id: "language".to_string(),
                description: format!("language proficiency at least {}", level.label()),
                field: ProfileField::Language,
                check: ConditionCheck::AtLeast {
                    minimum: level.rank(),
                    tolerance: ADJACENT_RANK_TOLERANCE,
                },
                enforcement: enforcement_flag(&self.language_required),
            });
        }

        if let Some(raw) = &self.intake_min {
            let frame = IntakeTimeframe::parse(raw).ok_or_else(|| invalid("intake_min", raw))?;
            conditions.push(GateCondition {
                id: "intake".to_string(),
                description: format!("intake runway at least {}", frame.label()),
                field: ProfileField::Intake,
                check: ConditionCheck::AtLeast {
                    minimum: frame.rank(),
                    tolerance: ADJACENT_RANK_TOLERANCE,
                },
                enforcement: enforcement_flag(&self.intake_required),
            });
        }

        if let Some(raw) = &self.interest_tags {
            let options: BTreeSet<String> = split_list(raw)
                .into_iter()
                .map(|tag| normalize_tag(&tag))
                .collect();
            if options.is_empty() {
                return Err(invalid("interest_tags", raw));
            }
            let listed = options.iter().cloned().collect::<Vec<_>>().join(", ");
            conditions.push(GateCondition {
                id: "interest".to_string(),
                description: format!("interest in {listed}"),
                field: ProfileField::Interests,
                check: ConditionCheck::SharesTag { options },
                enforcement: enforcement_flag(&self.interest_required),
            });
        }

        if let Some(raw) = &self.documents_min {
            let minimum: u8 = raw
                .trim()
                .parse()
                .ok()
                .filter(|count| *count <= crate::advisor::domain::DocumentChecklist::TOTAL)
                .ok_or_else(|| invalid("documents_min", raw))?;
            conditions.push(GateCondition {
                id: "documents".to_string(),
                description: format!("at least {minimum} application documents prepared"),
                field: ProfileField::Documents,
                check: ConditionCheck::AtLeast {
                    minimum,
                    tolerance: ADJACENT_RANK_TOLERANCE,
                },
                enforcement: enforcement_flag(&self.documents_required),
            });
        }

        let fit_weights = parse_weights(&rule_id, self.fit_weights.as_deref(), &conditions)?;
        let universities = self
            .universities
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
            .into_iter()
            .map(UniversityId)
            .collect();

        Ok(Rule {
            rule_id: RuleId(rule_id),
            pathway_name: self.pathway_name.trim().to_string(),
            selectivity,
            priority,
            conditions,
            fit_weights,
            universities,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UniversityRow {
    university_id: String,
    name: String,
    country: String,
}

impl UniversityRow {
    pub(super) fn into_university(self) -> Result<University, SnapshotError> {
        let university_id = self.university_id.trim().to_string();
        if university_id.is_empty() {
            return Err(SnapshotError::InvalidCell {
                record: "<unnamed>".to_string(),
                column: "university_id",
                value: self.university_id,
            });
        }
        Ok(University {
            university_id: UniversityId(university_id),
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
        })
    }
}

/// Parses the `id:weight` pairs of the fit-weight column and rejects keys
/// that do not name one of the rule's gate conditions.
fn parse_weights(
    rule_id: &str,
    raw: Option<&str>,
    conditions: &[GateCondition],
) -> Result<BTreeMap<String, f64>, SnapshotError> {
    let mut weights = BTreeMap::new();
    let Some(raw) = raw else {
        return Ok(weights);
    };

    for pair in raw.split('|').filter(|pair| !pair.trim().is_empty()) {
        let invalid = || SnapshotError::InvalidCell {
            record: rule_id.to_string(),
            column: "fit_weights",
            value: pair.trim().to_string(),
        };
        let (key, value) = pair.split_once(':').ok_or_else(invalid)?;
        let key = key.trim().to_string();
        let weight: f64 = value.trim().parse().map_err(|_| invalid())?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid());
        }
        if !conditions.iter().any(|condition| condition.id == key) {
            return Err(SnapshotError::UnknownWeightKey {
                rule_id: rule_id.to_string(),
                key,
            });
        }
        weights.insert(key, weight);
    }

    Ok(weights)
}

fn enforcement_flag(raw: &Option<String>) -> Enforcement {
    if parse_bool(raw.as_deref()) {
        Enforcement::Required
    } else {
        Enforcement::Advisory
    }
}

fn parse_bool(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "y")
    )
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
