use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::catalog::RuleSnapshot;
use super::engine::{AdvisorEngine, AdvisorReport};
use super::intake::{profile_from_answers, IntakeAnswers};
use crate::advisor::domain::StudentProfile;

/// Composition root binding the engine to one immutable snapshot.
///
/// Concurrent sessions share the service; the engine never mutates the
/// snapshot, so no locking is involved. Swapping rule data means building a
/// new service around a freshly loaded snapshot.
pub struct AdvisorService {
    engine: AdvisorEngine,
}

/// Shape summary of the loaded snapshot, for operators and smoke checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub rule_count: usize,
    pub university_count: usize,
}

impl AdvisorService {
    pub fn new(snapshot: Arc<RuleSnapshot>) -> Self {
        Self {
            engine: AdvisorEngine::new(snapshot),
        }
    }

    pub fn snapshot_summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            rule_count: self.engine.snapshot().rule_count(),
            university_count: self.engine.snapshot().university_count(),
        }
    }

    /// Evaluates a canonical engine-input profile.
    pub fn recommend(&self, profile: &StudentProfile) -> AdvisorReport {
        self.engine.evaluate(profile)
    }

    /// Maps raw intake answers into a profile, then evaluates it.
    pub fn recommend_from_answers(&self, answers: &IntakeAnswers, today: NaiveDate) -> AdvisorReport {
        let profile = profile_from_answers(answers, today);
        self.engine.evaluate(&profile)
    }
}
