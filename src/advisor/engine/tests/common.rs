use std::collections::{BTreeMap, BTreeSet};

use crate::advisor::domain::{
    AcademicBand, BudgetBand, ConditionCheck, DocumentChecklist, Enforcement, GateCondition,
    IntakeTimeframe, LanguageProficiency, ProfileField, Rule, RuleId, Selectivity, StudentProfile,
    StudyStage,
};

pub(super) fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn condition(
    id: &str,
    field: ProfileField,
    check: ConditionCheck,
    enforcement: Enforcement,
) -> GateCondition {
    GateCondition {
        id: id.to_string(),
        description: format!("{id} requirement"),
        field,
        check,
        enforcement,
    }
}

pub(super) fn rule_with(
    id: &str,
    selectivity: Selectivity,
    priority: i32,
    conditions: Vec<GateCondition>,
) -> Rule {
    Rule {
        rule_id: RuleId(id.to_string()),
        pathway_name: format!("{id} pathway"),
        selectivity,
        priority,
        conditions,
        fit_weights: BTreeMap::new(),
        universities: Vec::new(),
    }
}

/// A fully answered, strong profile.
pub(super) fn strong_profile() -> StudentProfile {
    StudentProfile {
        stage: Some(StudyStage::SecondarySchool),
        academic: Some(AcademicBand::Excellent),
        budget: Some(BudgetBand::Extensive),
        intake: Some(IntakeTimeframe::WithinYear),
        interests: Some(vec![
            "engineering".to_string(),
            "computer_science".to_string(),
        ]),
        language: Some(LanguageProficiency::Advanced),
        documents: Some(DocumentChecklist {
            transcript: true,
            identity: true,
            financial_evidence: true,
            references: false,
            personal_statement: true,
        }),
    }
}

/// A profile with only the interest question answered.
pub(super) fn interest_only_profile() -> StudentProfile {
    StudentProfile {
        interests: Some(vec!["business".to_string()]),
        ..StudentProfile::default()
    }
}
