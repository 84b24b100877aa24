use super::common::*;
use crate::advisor::domain::{ConditionOutcome, Selectivity};
use crate::advisor::engine::fit::{score_fit, FitScore, BORDERLINE_CREDIT};

use ConditionOutcome::{Borderline, HardFail, Matched, Missing};

fn weighted_rule(weights: &[(&str, f64)]) -> crate::advisor::domain::Rule {
    let conditions = weights
        .iter()
        .map(|&(id, _)| {
            condition(
                id,
                crate::advisor::domain::ProfileField::Academic,
                crate::advisor::domain::ConditionCheck::AtLeast {
                    minimum: 0,
                    tolerance: 0,
                },
                crate::advisor::domain::Enforcement::Advisory,
            )
        })
        .collect();
    let mut rule = rule_with("FIT-01", Selectivity::Low, 1, conditions);
    rule.fit_weights = weights
        .iter()
        .map(|&(id, weight)| (id.to_string(), weight))
        .collect();
    rule
}

#[test]
fn all_matched_conditions_score_one() {
    let rule = weighted_rule(&[("a", 2.0), ("b", 5.0)]);
    let fit = score_fit(&rule, &[Matched, Matched]);

    assert_eq!(fit.value, 1.0);
    assert!(!fit.low_confidence);
    assert_eq!(fit.evaluable, 2);
}

#[test]
fn borderline_earns_fractional_credit() {
    let rule = weighted_rule(&[("a", 3.0), ("b", 1.0)]);
    let fit = score_fit(&rule, &[Matched, Borderline]);

    // (3*1 + 1*0.5) / 4
    assert_eq!(fit.value, (3.0 + BORDERLINE_CREDIT) / 4.0);
}

#[test]
fn missing_conditions_shrink_the_denominator_only() {
    let rule = weighted_rule(&[("a", 2.0), ("b", 9.0)]);
    let fit = score_fit(&rule, &[Matched, Missing]);

    assert_eq!(fit.value, 1.0);
    assert_eq!(fit.evaluable, 1);
}

#[test]
fn nothing_evaluable_scores_zero_with_low_confidence() {
    let rule = weighted_rule(&[("a", 2.0), ("b", 1.0)]);
    let fit = score_fit(&rule, &[Missing, Missing]);

    assert_eq!(
        fit,
        FitScore {
            value: 0.0,
            low_confidence: true,
            evaluable: 0,
        }
    );
}

#[test]
fn hard_fail_outcomes_contribute_nothing() {
    let rule = weighted_rule(&[("a", 1.0), ("b", 1.0)]);
    let fit = score_fit(&rule, &[Borderline, HardFail]);

    assert_eq!(fit.value, BORDERLINE_CREDIT);
    assert_eq!(fit.evaluable, 1);
}

#[test]
fn score_stays_within_unit_interval() {
    let rule = weighted_rule(&[("a", 0.3), ("b", 7.0), ("c", 2.5)]);
    let outcome_sets = [
        [Matched, Matched, Matched],
        [Borderline, Borderline, Borderline],
        [Matched, Borderline, Missing],
        [Missing, Borderline, Matched],
    ];

    for outcomes in outcome_sets {
        let fit = score_fit(&rule, &outcomes);
        assert!((0.0..=1.0).contains(&fit.value), "fit {}", fit.value);
    }
}

#[test]
fn identical_inputs_yield_bit_identical_scores() {
    let rule = weighted_rule(&[("a", 1.7), ("b", 2.9), ("c", 0.4)]);
    let outcomes = [Matched, Borderline, Matched];

    let first = score_fit(&rule, &outcomes);
    let second = score_fit(&rule, &outcomes);

    assert_eq!(first.value.to_bits(), second.value.to_bits());
}
