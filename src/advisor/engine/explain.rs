use serde::Serialize;

use crate::advisor::domain::{ConditionOutcome, Enforcement, Rule};

use super::fit::FitScore;
use super::gate::GateEvaluation;
use super::rank::Tier;

/// Self-contained audit record for one surfaced recommendation. A reviewer
/// can verify the recommendation from this record alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub matched_conditions: Vec<String>,
    pub borderline_conditions: Vec<String>,
    pub missing_conditions: Vec<String>,
    pub ranking_reason: String,
}

/// Assembles the evidence trail and templated ranking reason for a selected
/// rule.
pub(crate) fn build_explanation(
    rule: &Rule,
    gate: &GateEvaluation,
    fit: FitScore,
    tier: Tier,
) -> Explanation {
    let required_total = rule.required_condition_count();
    let required_matched = rule
        .conditions
        .iter()
        .zip(&gate.outcomes)
        .filter(|(condition, outcome)| {
            condition.enforcement == Enforcement::Required
                && **outcome == ConditionOutcome::Matched
        })
        .count();

    let mut ranking_reason = format!(
        "{required_matched} of {required_total} required conditions matched; fit score {:.0}%; selected as {}",
        fit.value * 100.0,
        tier.label()
    );
    if fit.low_confidence {
        ranking_reason.push_str("; limited evidence, no condition was evaluable");
    }

    Explanation {
        matched_conditions: gate.matched.clone(),
        borderline_conditions: gate.borderline.clone(),
        missing_conditions: gate.missing.clone(),
        ranking_reason,
    }
}
