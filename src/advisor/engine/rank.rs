use serde::{Deserialize, Serialize};

use crate::advisor::domain::{RuleId, Selectivity};

/// Minimum fit a low-selectivity pathway needs to be called Safe.
pub const SAFE_MIN_FIT: f64 = 0.65;
/// Minimum fit a moderate-selectivity pathway needs to be called Target.
pub const TARGET_MIN_FIT: f64 = 0.45;
/// Floor below which even a high-selectivity pathway is not worth surfacing.
pub const ASPIRATIONAL_MIN_FIT: f64 = 0.25;

/// Shortlist tier reflecting the selectivity-versus-fit trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Safe,
    Target,
    Aspirational,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::Target => "target",
            Tier::Aspirational => "aspirational",
        }
    }
}

/// Maps a rule's declared selectivity and earned fit score onto a tier.
///
/// The mapping is total except for high-selectivity rules below the
/// aspirational floor, which are discarded rather than surfaced.
pub(crate) fn assign_tier(selectivity: Selectivity, fit: f64) -> Option<Tier> {
    match selectivity {
        Selectivity::Low => {
            if fit >= SAFE_MIN_FIT {
                Some(Tier::Safe)
            } else {
                Some(Tier::Target)
            }
        }
        Selectivity::Moderate => {
            if fit >= TARGET_MIN_FIT {
                Some(Tier::Target)
            } else {
                Some(Tier::Aspirational)
            }
        }
        Selectivity::High => {
            if fit >= ASPIRATIONAL_MIN_FIT {
                Some(Tier::Aspirational)
            } else {
                None
            }
        }
    }
}

/// Sortable summary of one gate-passing rule.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankingEntry {
    /// Index into the engine's evaluation table.
    pub rule_index: usize,
    pub fit: f64,
    pub priority: i32,
    pub rule_id: RuleId,
    pub tier: Option<Tier>,
}

/// Orders passing rules by fit descending, then ascending priority, then
/// ascending rule id. `total_cmp` keeps the order total and reproducible.
pub(crate) fn rank(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(|a, b| {
        b.fit
            .total_cmp(&a.fit)
            .then_with(|| a.priority.cmp(&b.priority))
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    entries
}

/// Walks the ranked order and keeps the first rule seen for each tier.
///
/// A tier with no candidate is simply absent; it is never backfilled from
/// another tier. Returns at most three selections, in rank order.
pub(crate) fn select(ranked: &[RankingEntry]) -> Vec<(usize, Tier)> {
    let mut selections = Vec::with_capacity(3);
    let mut taken = [false; 3];

    for entry in ranked {
        let Some(tier) = entry.tier else { continue };
        let slot = tier as usize;
        if taken[slot] {
            continue;
        }
        taken[slot] = true;
        selections.push((entry.rule_index, tier));
        if selections.len() == 3 {
            break;
        }
    }

    selections
}
