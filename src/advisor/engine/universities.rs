use std::collections::BTreeSet;

use serde::Serialize;

use crate::advisor::domain::{Rule, University, UniversityId};

use super::gate::GateEvaluation;
use super::rank::Tier;

/// How many matched conditions a match reason cites before truncating.
const REASON_CONDITION_CAP: usize = 3;

/// Resolved institution reference for a surfaced recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversityMatch {
    pub university_id: UniversityId,
    pub name: String,
    pub country: String,
    pub tier: Tier,
    pub match_reason: String,
}

/// Resolves the university references of each selected pathway.
///
/// Selections arrive in rank order and references are walked in their
/// declared order, so the output order mirrors the ranker's tie-breaks.
/// An institution referenced by several selected pathways keeps its
/// highest-ranked occurrence only.
pub(crate) fn resolve_matches<'a>(
    selections: impl Iterator<Item = (&'a Rule, Tier, &'a GateEvaluation)>,
    directory: impl Fn(&UniversityId) -> Option<&'a University>,
) -> Vec<UniversityMatch> {
    let mut seen: BTreeSet<UniversityId> = BTreeSet::new();
    let mut matches = Vec::new();

    for (rule, tier, gate) in selections {
        let reason = match_reason(rule, gate);
        for reference in &rule.universities {
            if seen.contains(reference) {
                continue;
            }
            let Some(university) = directory(reference) else {
                continue;
            };
            seen.insert(reference.clone());
            matches.push(UniversityMatch {
                university_id: university.university_id.clone(),
                name: university.name.clone(),
                country: university.country.clone(),
                tier,
                match_reason: reason.clone(),
            });
        }
    }

    matches
}

fn match_reason(rule: &Rule, gate: &GateEvaluation) -> String {
    if gate.matched.is_empty() {
        return format!("linked to {}", rule.pathway_name);
    }

    let cited = gate
        .matched
        .iter()
        .take(REASON_CONDITION_CAP)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");
    format!("supports {} via {}", rule.pathway_name, cited)
}
