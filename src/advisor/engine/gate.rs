use super::condition::evaluate_condition;
use crate::advisor::domain::{ConditionOutcome, Rule, RuleId, StudentProfile};

/// Evidence collected while running every condition of one rule.
///
/// `outcomes` stays parallel to the rule's condition declaration order so the
/// fit scorer can pair each outcome with its weight deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GateEvaluation {
    pub rule_id: RuleId,
    pub passed: bool,
    pub outcomes: Vec<ConditionOutcome>,
    pub matched: Vec<String>,
    pub borderline: Vec<String>,
    pub missing: Vec<String>,
    pub hard_failures: Vec<String>,
}

/// Runs the condition evaluator over every gate condition of `rule`.
///
/// The gate passes iff no condition hard-fails. Evidence lists are collected
/// for every rule, pass or fail, so counselor diagnostics can explain
/// exclusions without re-running the engine.
pub(crate) fn evaluate_gate(rule: &Rule, profile: &StudentProfile) -> GateEvaluation {
    let mut outcomes = Vec::with_capacity(rule.conditions.len());
    let mut matched = Vec::new();
    let mut borderline = Vec::new();
    let mut missing = Vec::new();
    let mut hard_failures = Vec::new();

    for condition in &rule.conditions {
        let outcome = evaluate_condition(condition, profile);
        match outcome {
            ConditionOutcome::Matched => matched.push(condition.description.clone()),
            ConditionOutcome::Borderline => borderline.push(condition.description.clone()),
            ConditionOutcome::Missing => missing.push(condition.description.clone()),
            ConditionOutcome::HardFail => hard_failures.push(condition.description.clone()),
        }
        outcomes.push(outcome);
    }

    GateEvaluation {
        rule_id: rule.rule_id.clone(),
        passed: hard_failures.is_empty(),
        outcomes,
        matched,
        borderline,
        missing,
        hard_failures,
    }
}
