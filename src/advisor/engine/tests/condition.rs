use super::common::*;
use crate::advisor::domain::{
    ConditionCheck, ConditionOutcome, Enforcement, ProfileField, StudentProfile,
};
use crate::advisor::engine::condition::evaluate_condition;

#[test]
fn absent_field_is_missing_even_when_required() {
    let condition = condition(
        "academic",
        ProfileField::Academic,
        ConditionCheck::AtLeast {
            minimum: 3,
            tolerance: 1,
        },
        Enforcement::Required,
    );

    let outcome = evaluate_condition(&condition, &StudentProfile::default());

    assert_eq!(outcome, ConditionOutcome::Missing);
}

#[test]
fn threshold_met_exactly_is_matched() {
    let condition = condition(
        "academic",
        ProfileField::Academic,
        ConditionCheck::AtLeast {
            minimum: 4,
            tolerance: 1,
        },
        Enforcement::Required,
    );

    let outcome = evaluate_condition(&condition, &strong_profile());

    assert_eq!(outcome, ConditionOutcome::Matched);
}

#[test]
fn adjacent_rank_below_threshold_is_borderline() {
    let profile = StudentProfile {
        academic: Some(crate::advisor::domain::AcademicBand::Strong),
        ..StudentProfile::default()
    };
    let condition = condition(
        "academic",
        ProfileField::Academic,
        ConditionCheck::AtLeast {
            minimum: 4,
            tolerance: 1,
        },
        Enforcement::Required,
    );

    assert_eq!(
        evaluate_condition(&condition, &profile),
        ConditionOutcome::Borderline
    );
}

#[test]
fn required_failure_beyond_tolerance_hard_fails() {
    let profile = StudentProfile {
        academic: Some(crate::advisor::domain::AcademicBand::Fair),
        ..StudentProfile::default()
    };
    let condition = condition(
        "academic",
        ProfileField::Academic,
        ConditionCheck::AtLeast {
            minimum: 4,
            tolerance: 1,
        },
        Enforcement::Required,
    );

    assert_eq!(
        evaluate_condition(&condition, &profile),
        ConditionOutcome::HardFail
    );
}

#[test]
fn advisory_failure_degrades_to_borderline() {
    let profile = StudentProfile {
        academic: Some(crate::advisor::domain::AcademicBand::Fair),
        ..StudentProfile::default()
    };
    let condition = condition(
        "academic",
        ProfileField::Academic,
        ConditionCheck::AtLeast {
            minimum: 4,
            tolerance: 1,
        },
        Enforcement::Advisory,
    );

    assert_eq!(
        evaluate_condition(&condition, &profile),
        ConditionOutcome::Borderline
    );
}

#[test]
fn equality_check_has_no_tolerance_band() {
    let matched = condition(
        "stage",
        ProfileField::Stage,
        ConditionCheck::Equals { expected: 0 },
        Enforcement::Required,
    );
    let mismatched = condition(
        "stage",
        ProfileField::Stage,
        ConditionCheck::Equals { expected: 1 },
        Enforcement::Required,
    );

    let profile = strong_profile();
    assert_eq!(
        evaluate_condition(&matched, &profile),
        ConditionOutcome::Matched
    );
    assert_eq!(
        evaluate_condition(&mismatched, &profile),
        ConditionOutcome::HardFail
    );
}

#[test]
fn range_check_marks_both_edges_borderline() {
    let condition = condition(
        "budget",
        ProfileField::Budget,
        ConditionCheck::Within {
            min: 1,
            max: 2,
            tolerance: 1,
        },
        Enforcement::Required,
    );

    let make = |band| StudentProfile {
        budget: Some(band),
        ..StudentProfile::default()
    };

    use crate::advisor::domain::BudgetBand;
    assert_eq!(
        evaluate_condition(&condition, &make(BudgetBand::Modest)),
        ConditionOutcome::Matched
    );
    assert_eq!(
        evaluate_condition(&condition, &make(BudgetBand::Minimal)),
        ConditionOutcome::Borderline
    );
    assert_eq!(
        evaluate_condition(&condition, &make(BudgetBand::Comfortable)),
        ConditionOutcome::Borderline
    );
    assert_eq!(
        evaluate_condition(&condition, &make(BudgetBand::Extensive)),
        ConditionOutcome::HardFail
    );
}

#[test]
fn tag_overlap_matches_and_disjoint_fails() {
    let condition = condition(
        "interest",
        ProfileField::Interests,
        ConditionCheck::SharesTag {
            options: tags(&["engineering", "data"]),
        },
        Enforcement::Required,
    );

    assert_eq!(
        evaluate_condition(&condition, &strong_profile()),
        ConditionOutcome::Matched
    );
    assert_eq!(
        evaluate_condition(&condition, &interest_only_profile()),
        ConditionOutcome::HardFail
    );
}
