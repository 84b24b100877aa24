//! Pathway advisory: deterministic engine plus its loading and serving seams.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod router;
pub mod service;

pub use catalog::{RuleSnapshot, SnapshotError, SnapshotLoader};
pub use domain::{
    AcademicBand, BudgetBand, ConditionCheck, ConditionOutcome, DocumentChecklist, Enforcement,
    GateCondition, IntakeTimeframe, LanguageProficiency, ProfileField, Rule, RuleId, Selectivity,
    StudentProfile, StudyStage, University, UniversityId,
};
pub use engine::{
    AdvisorEngine, AdvisorReport, Explanation, PathwayRecommendation, ReadinessBreakdown,
    ReadinessScore, RecommendationOutcome, RuleAudit, RuleDisposition, Tier, UniversityMatch,
};
pub use intake::{profile_from_answers, IntakeAnswers};
pub use router::advisor_router;
pub use service::{AdvisorService, SnapshotSummary};
