//! Deterministic decision engine: gate evaluation, fit and readiness scoring,
//! ranking, university matching, and explanation assembly.
//!
//! The engine is a pure function of (profile, rule snapshot). It performs no
//! I/O, holds no mutable state, and identical inputs always produce
//! byte-identical serialized output.

mod condition;
mod explain;
mod fit;
mod gate;
mod rank;
mod readiness;
mod universities;

#[cfg(test)]
mod tests;

pub use explain::Explanation;
pub use fit::BORDERLINE_CREDIT;
pub use rank::{Tier, ASPIRATIONAL_MIN_FIT, SAFE_MIN_FIT, TARGET_MIN_FIT};
pub use readiness::{
    ReadinessBreakdown, ReadinessScore, ACADEMIC_WEIGHT, DOCUMENTATION_WEIGHT, FINANCIAL_WEIGHT,
    LANGUAGE_WEIGHT, TIMELINE_WEIGHT,
};
pub use universities::UniversityMatch;

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::advisor::catalog::RuleSnapshot;
use crate::advisor::domain::{RuleId, StudentProfile};

use gate::GateEvaluation;
use rank::RankingEntry;

/// Stateless evaluator bound to one immutable rule snapshot.
pub struct AdvisorEngine {
    snapshot: Arc<RuleSnapshot>,
}

impl AdvisorEngine {
    pub fn new(snapshot: Arc<RuleSnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &RuleSnapshot {
        &self.snapshot
    }

    /// Evaluates one profile against every rule in the snapshot.
    pub fn evaluate(&self, profile: &StudentProfile) -> AdvisorReport {
        let rules: Vec<_> = self.snapshot.rules().collect();
        let gates: Vec<GateEvaluation> = rules
            .iter()
            .map(|rule| gate::evaluate_gate(rule, profile))
            .collect();

        let mut fits = vec![None; rules.len()];
        let mut entries = Vec::new();
        for (index, (rule, evaluation)) in rules.iter().zip(&gates).enumerate() {
            if !evaluation.passed {
                continue;
            }
            let fit = fit::score_fit(rule, &evaluation.outcomes);
            entries.push(RankingEntry {
                rule_index: index,
                fit: fit.value,
                priority: rule.priority,
                rule_id: rule.rule_id.clone(),
                tier: rank::assign_tier(rule.selectivity, fit.value),
            });
            fits[index] = Some(fit);
        }

        let any_passing = !entries.is_empty();
        let ranked = rank::rank(entries);
        let selections = rank::select(&ranked);

        // Only gate-passing rules are ranked, so every selection has a fit.
        let recommendations: Vec<PathwayRecommendation> = selections
            .iter()
            .filter_map(|&(index, tier)| {
                let rule = rules[index];
                let fit = fits[index]?;
                Some(PathwayRecommendation {
                    rule_id: rule.rule_id.clone(),
                    pathway_name: rule.pathway_name.clone(),
                    tier,
                    fit_score: fit.value,
                    low_confidence: fit.low_confidence,
                    explanation: explain::build_explanation(rule, &gates[index], fit, tier),
                })
            })
            .collect();

        let university_matches = universities::resolve_matches(
            selections
                .iter()
                .map(|&(index, tier)| (rules[index], tier, &gates[index])),
            |id| self.snapshot.university(id),
        );

        let selected: BTreeSet<usize> = selections.iter().map(|&(index, _)| index).collect();
        let audit = rules
            .iter()
            .zip(&gates)
            .enumerate()
            .map(|(index, (rule, evaluation))| RuleAudit {
                rule_id: rule.rule_id.clone(),
                disposition: if !evaluation.passed {
                    RuleDisposition::Excluded
                } else if selected.contains(&index) {
                    RuleDisposition::Surfaced
                } else {
                    RuleDisposition::Discarded
                },
                fit_score: fits[index].map(|fit| fit.value),
                hard_failures: evaluation.hard_failures.clone(),
            })
            .collect();

        AdvisorReport {
            outcome: if any_passing {
                RecommendationOutcome::Shortlist { recommendations }
            } else {
                RecommendationOutcome::NoMatch
            },
            readiness: readiness::score_readiness(profile),
            university_matches,
            audit,
        }
    }
}

/// One surfaced pathway with its full evidence trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwayRecommendation {
    pub rule_id: RuleId,
    pub pathway_name: String,
    pub tier: Tier,
    pub fit_score: f64,
    pub low_confidence: bool,
    pub explanation: Explanation,
}

/// Engine verdict. A profile that defeats every gate yields `NoMatch`, a
/// representable answer distinct from an uncomputed or empty shortlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Shortlist {
        recommendations: Vec<PathwayRecommendation>,
    },
    NoMatch,
}

/// Terminal state a rule reached during one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDisposition {
    /// Gate failed; never scored.
    Excluded,
    /// Passed the gate but lost ranking or tier selection.
    Discarded,
    /// Selected and explained.
    Surfaced,
}

/// Counselor-facing disposition entry, one per rule in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleAudit {
    pub rule_id: RuleId,
    pub disposition: RuleDisposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_score: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hard_failures: Vec<String>,
}

/// Complete evaluation payload handed to presentation collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorReport {
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
    pub readiness: ReadinessScore,
    pub university_matches: Vec<UniversityMatch>,
    pub audit: Vec<RuleAudit>,
}
