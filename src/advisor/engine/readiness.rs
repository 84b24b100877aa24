use serde::Serialize;

use crate::advisor::domain::{DocumentChecklist, IntakeTimeframe, StudentProfile};

/// Factor weights, in percent. They sum to 100 so the composite stays 0-100.
pub const ACADEMIC_WEIGHT: u32 = 30;
pub const FINANCIAL_WEIGHT: u32 = 25;
pub const LANGUAGE_WEIGHT: u32 = 20;
pub const DOCUMENTATION_WEIGHT: u32 = 15;
pub const TIMELINE_WEIGHT: u32 = 10;

/// Per-factor sub-scores, each 0-100. A factor whose fields were never
/// answered scores 0 so improving any field is monotone from the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessBreakdown {
    pub academic: u8,
    pub financial: u8,
    pub language: u8,
    pub timeline: u8,
    pub documentation: u8,
}

/// Profile-only composite readiness, independent of any single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessScore {
    pub composite: u8,
    pub breakdown: ReadinessBreakdown,
}

/// Computes the composite readiness score from the profile alone.
///
/// Every factor function is monotone in its field's ordinal rank, so
/// improving any single answer never lowers a sub-score or the composite.
pub(crate) fn score_readiness(profile: &StudentProfile) -> ReadinessScore {
    let academic = profile
        .academic
        .map(|band| scale_rank(band.rank(), 4))
        .unwrap_or(0);
    let financial = profile
        .budget
        .map(|band| scale_rank(band.rank(), 4))
        .unwrap_or(0);
    let language = profile
        .language
        .map(|level| scale_rank(level.rank(), 2))
        .unwrap_or(0);
    let timeline = profile.intake.map(timeline_score).unwrap_or(0);
    let documentation = profile
        .documents
        .map(|checklist| scale_rank(checklist.ready_count(), DocumentChecklist::TOTAL))
        .unwrap_or(0);

    let weighted = u32::from(academic) * ACADEMIC_WEIGHT
        + u32::from(financial) * FINANCIAL_WEIGHT
        + u32::from(language) * LANGUAGE_WEIGHT
        + u32::from(timeline) * TIMELINE_WEIGHT
        + u32::from(documentation) * DOCUMENTATION_WEIGHT;
    let composite = ((weighted + 50) / 100) as u8;

    ReadinessScore {
        composite,
        breakdown: ReadinessBreakdown {
            academic,
            financial,
            language,
            timeline,
            documentation,
        },
    }
}

fn scale_rank(rank: u8, max_rank: u8) -> u8 {
    if max_rank == 0 {
        return 0;
    }
    ((u32::from(rank) * 100 + u32::from(max_rank) / 2) / u32::from(max_rank)) as u8
}

fn timeline_score(frame: IntakeTimeframe) -> u8 {
    match frame {
        IntakeTimeframe::Immediate => 25,
        IntakeTimeframe::WithinSixMonths => 55,
        IntakeTimeframe::WithinYear => 85,
        IntakeTimeframe::Flexible => 100,
    }
}
