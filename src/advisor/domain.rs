use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for eligibility rules. Upsert identity during loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// Identifier wrapper for institutions in the university directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UniversityId(pub String);

/// Study stage the student is progressing from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyStage {
    SecondarySchool,
    Diploma,
}

impl StudyStage {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "secondary" | "secondary_school" | "secondary-school" => Some(Self::SecondarySchool),
            "diploma" => Some(Self::Diploma),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::SecondarySchool => 0,
            Self::Diploma => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SecondarySchool => "secondary school",
            Self::Diploma => "diploma",
        }
    }
}

/// Academic result band, ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicBand {
    Developing,
    Fair,
    Good,
    Strong,
    Excellent,
}

impl AcademicBand {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "developing" => Some(Self::Developing),
            "fair" => Some(Self::Fair),
            "good" => Some(Self::Good),
            "strong" => Some(Self::Strong),
            "excellent" => Some(Self::Excellent),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Developing => "developing",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
            Self::Excellent => "excellent",
        }
    }
}

/// Monthly budget band, ordered tightest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBand {
    Minimal,
    Modest,
    Moderate,
    Comfortable,
    Extensive,
}

impl BudgetBand {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimal" => Some(Self::Minimal),
            "modest" => Some(Self::Modest),
            "moderate" => Some(Self::Moderate),
            "comfortable" => Some(Self::Comfortable),
            "extensive" => Some(Self::Extensive),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Modest => "modest",
            Self::Moderate => "moderate",
            Self::Comfortable => "comfortable",
            Self::Extensive => "extensive",
        }
    }
}

/// Planning runway until the student can start, ordered shortest to most open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeTimeframe {
    Immediate,
    WithinSixMonths,
    WithinYear,
    Flexible,
}

impl IntakeTimeframe {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" => Some(Self::Immediate),
            "within_six_months" => Some(Self::WithinSixMonths),
            "within_year" => Some(Self::WithinYear),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::WithinSixMonths => "within six months",
            Self::WithinYear => "within a year",
            Self::Flexible => "flexible",
        }
    }
}

/// Self-assessed or test-derived language proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageProficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl LanguageProficiency {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Application paperwork the student has already prepared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    #[serde(default)]
    pub transcript: bool,
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub financial_evidence: bool,
    #[serde(default)]
    pub references: bool,
    #[serde(default)]
    pub personal_statement: bool,
}

impl DocumentChecklist {
    pub const TOTAL: u8 = 5;

    pub fn ready_count(&self) -> u8 {
        [
            self.transcript,
            self.identity,
            self.financial_evidence,
            self.references,
            self.personal_statement,
        ]
        .iter()
        .filter(|flag| **flag)
        .count() as u8
    }
}

/// Engine-input profile. Every field is independently optional so an
/// unanswered question stays distinguishable from any real answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default)]
    pub stage: Option<StudyStage>,
    #[serde(default)]
    pub academic: Option<AcademicBand>,
    #[serde(default)]
    pub budget: Option<BudgetBand>,
    #[serde(default)]
    pub intake: Option<IntakeTimeframe>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<LanguageProficiency>,
    #[serde(default)]
    pub documents: Option<DocumentChecklist>,
}

impl StudentProfile {
    /// Resolves a field reference to its comparable value, or `None` when the
    /// student never answered the corresponding question.
    pub fn field(&self, field: ProfileField) -> Option<FieldValue> {
        match field {
            ProfileField::Stage => self.stage.map(|stage| FieldValue::Level(stage.rank())),
            ProfileField::Academic => self.academic.map(|band| FieldValue::Level(band.rank())),
            ProfileField::Budget => self.budget.map(|band| FieldValue::Level(band.rank())),
            ProfileField::Intake => self.intake.map(|frame| FieldValue::Level(frame.rank())),
            ProfileField::Interests => self
                .interests
                .as_ref()
                .filter(|tags| !tags.is_empty())
                .map(|tags| FieldValue::Tags(tags.iter().map(|tag| normalize_tag(tag)).collect())),
            ProfileField::Language => self.language.map(|level| FieldValue::Level(level.rank())),
            ProfileField::Documents => self
                .documents
                .map(|checklist| FieldValue::Count(checklist.ready_count())),
        }
    }
}

/// Closed set of profile fields a gate condition may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Stage,
    Academic,
    Budget,
    Intake,
    Interests,
    Language,
    Documents,
}

impl ProfileField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stage => "study stage",
            Self::Academic => "academic result",
            Self::Budget => "budget",
            Self::Intake => "intake timeframe",
            Self::Interests => "program interests",
            Self::Language => "language proficiency",
            Self::Documents => "documentation readiness",
        }
    }
}

/// Comparable value behind a profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Ordinal rank of a band-style answer.
    Level(u8),
    /// Tally-style answer such as prepared documents.
    Count(u8),
    /// Normalized interest tags.
    Tags(BTreeSet<String>),
}

impl FieldValue {
    pub(crate) fn magnitude(&self) -> Option<u8> {
        match self {
            FieldValue::Level(value) | FieldValue::Count(value) => Some(*value),
            FieldValue::Tags(_) => None,
        }
    }
}

/// Whether a failed comparison sinks the rule or only dampens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enforcement {
    Required,
    Advisory,
}

/// Closed comparison kinds a condition may apply to its field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCheck {
    /// Exact categorical equality on an ordinal field.
    Equals { expected: u8 },
    /// Ordinal threshold; ranks within `tolerance` below count as borderline.
    AtLeast { minimum: u8, tolerance: u8 },
    /// Inclusive ordinal range with a borderline band on both edges.
    Within { min: u8, max: u8, tolerance: u8 },
    /// Set membership: any overlap with the listed tags satisfies the check.
    SharesTag { options: BTreeSet<String> },
}

/// One gate predicate of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCondition {
    /// Stable identifier, also the key into the rule's fit-weight mapping.
    pub id: String,
    /// Human-readable description surfaced in evidence lists.
    pub description: String,
    pub field: ProfileField,
    pub check: ConditionCheck,
    pub enforcement: Enforcement,
}

/// Selectivity hint declared on a rule, driving tier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selectivity {
    Low,
    Moderate,
    High,
}

impl Selectivity {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// One eligibility rule from the loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: RuleId,
    pub pathway_name: String,
    pub selectivity: Selectivity,
    /// Deterministic tie-break key; lower values win ties.
    pub priority: i32,
    /// Gate conditions in declaration order. Scoring sums in this order.
    pub conditions: Vec<GateCondition>,
    /// Fit weight per condition id. Conditions without an entry weigh 1.0.
    pub fit_weights: BTreeMap<String, f64>,
    pub universities: Vec<UniversityId>,
}

impl Rule {
    pub fn weight_for(&self, condition_id: &str) -> f64 {
        self.fit_weights.get(condition_id).copied().unwrap_or(1.0)
    }

    pub fn required_condition_count(&self) -> usize {
        self.conditions
            .iter()
            .filter(|condition| condition.enforcement == Enforcement::Required)
            .count()
    }
}

/// Directory entry a rule's university references resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub university_id: UniversityId,
    pub name: String,
    pub country: String,
}

/// Tri-state-plus-failure outcome of evaluating one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOutcome {
    Matched,
    Borderline,
    HardFail,
    Missing,
}

/// Canonical form for interest tags so rule options and student answers
/// compare independent of casing and separators.
pub(crate) fn normalize_tag(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
