use crate::advisor::domain::{ConditionOutcome, Rule};

/// Credit a borderline outcome earns relative to a full match.
pub const BORDERLINE_CREDIT: f64 = 0.5;

/// Bounded fit score for a rule that passed its gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FitScore {
    /// Weighted-average match strength in [0, 1].
    pub value: f64,
    /// Set when no condition was evaluable at all.
    pub low_confidence: bool,
    /// Conditions that contributed to the score.
    pub evaluable: usize,
}

/// Computes `sum(weight * credit) / sum(weight)` over matched and borderline
/// conditions in declaration order. Missing conditions are excluded from both
/// sums: they shrink the evidence base instead of penalizing the score.
pub(crate) fn score_fit(rule: &Rule, outcomes: &[ConditionOutcome]) -> FitScore {
    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    let mut evaluable = 0_usize;

    for (condition, outcome) in rule.conditions.iter().zip(outcomes) {
        let credit = match outcome {
            ConditionOutcome::Matched => 1.0,
            ConditionOutcome::Borderline => BORDERLINE_CREDIT,
            ConditionOutcome::Missing | ConditionOutcome::HardFail => continue,
        };
        let weight = rule.weight_for(&condition.id);
        numerator += weight * credit;
        denominator += weight;
        evaluable += 1;
    }

    if denominator == 0.0 {
        return FitScore {
            value: 0.0,
            low_confidence: true,
            evaluable: 0,
        };
    }

    FitScore {
        value: numerator / denominator,
        low_confidence: false,
        evaluable,
    }
}
