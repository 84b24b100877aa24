//! Mapping layer translating raw intake answers into the canonical
//! engine-input profile. Date arithmetic takes an explicit `today` so the
//! translation stays deterministic; only the service boundary defaults it.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::advisor::domain::{
    normalize_tag, AcademicBand, BudgetBand, DocumentChecklist, IntakeTimeframe,
    LanguageProficiency, StudentProfile, StudyStage,
};

/// Monthly budget floors, in the catalog's base currency, for each band.
pub const MODEST_BUDGET_FLOOR: u32 = 800;
pub const MODERATE_BUDGET_FLOOR: u32 = 1_500;
pub const COMFORTABLE_BUDGET_FLOOR: u32 = 3_000;
pub const EXTENSIVE_BUDGET_FLOOR: u32 = 6_000;

/// Test score that certifies advanced proficiency regardless of self-rating.
pub const ADVANCED_TEST_SCORE: u8 = 75;
/// Test score that certifies at least intermediate proficiency.
pub const INTERMEDIATE_TEST_SCORE: u8 = 50;

/// Profiles carry at most this many interest tags.
pub const MAX_INTEREST_TAGS: usize = 3;

/// Raw intake answers as collected by the conversational flow. Every field
/// is optional; unknown or unparsable answers map to an unanswered field
/// rather than a fabricated one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeAnswers {
    #[serde(default)]
    pub study_stage: Option<String>,
    #[serde(default)]
    pub academic_result: Option<String>,
    #[serde(default)]
    pub monthly_budget: Option<u32>,
    #[serde(default)]
    pub preferred_intake_month: Option<String>,
    #[serde(default)]
    pub flexible_intake: Option<bool>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub language_self_rating: Option<String>,
    #[serde(default)]
    pub language_test_score: Option<u8>,
    #[serde(default)]
    pub documents: Option<DocumentChecklist>,
}

/// Builds the canonical profile from raw answers, anchoring intake-month
/// arithmetic on `today`.
pub fn profile_from_answers(answers: &IntakeAnswers, today: NaiveDate) -> StudentProfile {
    StudentProfile {
        stage: answers
            .study_stage
            .as_deref()
            .and_then(StudyStage::parse),
        academic: answers
            .academic_result
            .as_deref()
            .and_then(AcademicBand::parse),
        budget: answers.monthly_budget.map(budget_band),
        intake: intake_timeframe(
            answers.flexible_intake,
            answers.preferred_intake_month.as_deref(),
            today,
        ),
        interests: normalize_interests(&answers.interests),
        language: language_level(
            answers.language_test_score,
            answers.language_self_rating.as_deref(),
        ),
        documents: answers.documents,
    }
}

fn budget_band(monthly: u32) -> BudgetBand {
    if monthly >= EXTENSIVE_BUDGET_FLOOR {
        BudgetBand::Extensive
    } else if monthly >= COMFORTABLE_BUDGET_FLOOR {
        BudgetBand::Comfortable
    } else if monthly >= MODERATE_BUDGET_FLOOR {
        BudgetBand::Moderate
    } else if monthly >= MODEST_BUDGET_FLOOR {
        BudgetBand::Modest
    } else {
        BudgetBand::Minimal
    }
}

fn intake_timeframe(
    flexible: Option<bool>,
    preferred_month: Option<&str>,
    today: NaiveDate,
) -> Option<IntakeTimeframe> {
    if flexible == Some(true) {
        return Some(IntakeTimeframe::Flexible);
    }

    let month = preferred_month.and_then(month_number)?;
    let delta = (i32::from(month) - today.month() as i32).rem_euclid(12) as u8;
    Some(if delta <= 3 {
        IntakeTimeframe::Immediate
    } else if delta <= 6 {
        IntakeTimeframe::WithinSixMonths
    } else {
        IntakeTimeframe::WithinYear
    })
}

fn month_number(name: &str) -> Option<u8> {
    match name.trim().to_ascii_lowercase().as_str() {
        "january" => Some(1),
        "february" => Some(2),
        "march" => Some(3),
        "april" => Some(4),
        "may" => Some(5),
        "june" => Some(6),
        "july" => Some(7),
        "august" => Some(8),
        "september" => Some(9),
        "october" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

fn normalize_interests(raw: &[String]) -> Option<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let normalized = normalize_tag(tag);
        if normalized.is_empty() || tags.contains(&normalized) {
            continue;
        }
        tags.push(normalized);
        if tags.len() == MAX_INTEREST_TAGS {
            break;
        }
    }

    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

fn language_level(
    test_score: Option<u8>,
    self_rating: Option<&str>,
) -> Option<LanguageProficiency> {
    if let Some(score) = test_score {
        return Some(if score >= ADVANCED_TEST_SCORE {
            LanguageProficiency::Advanced
        } else if score >= INTERMEDIATE_TEST_SCORE {
            LanguageProficiency::Intermediate
        } else {
            LanguageProficiency::Beginner
        });
    }

    self_rating.and_then(LanguageProficiency::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
    }

    #[test]
    fn unanswered_fields_stay_missing() {
        let profile = profile_from_answers(&IntakeAnswers::default(), today());
        assert_eq!(profile, StudentProfile::default());
    }

    #[test]
    fn budget_figures_map_to_bands() {
        let cases = [
            (500, BudgetBand::Minimal),
            (800, BudgetBand::Modest),
            (2_000, BudgetBand::Moderate),
            (4_500, BudgetBand::Comfortable),
            (9_000, BudgetBand::Extensive),
        ];
        for (monthly, expected) in cases {
            let answers = IntakeAnswers {
                monthly_budget: Some(monthly),
                ..IntakeAnswers::default()
            };
            assert_eq!(
                profile_from_answers(&answers, today()).budget,
                Some(expected),
                "budget {monthly}"
            );
        }
    }

    #[test]
    fn preferred_month_resolves_against_today() {
        let answers = IntakeAnswers {
            preferred_intake_month: Some("May".to_string()),
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).intake,
            Some(IntakeTimeframe::Immediate)
        );

        let answers = IntakeAnswers {
            preferred_intake_month: Some("September".to_string()),
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).intake,
            Some(IntakeTimeframe::WithinSixMonths)
        );

        let answers = IntakeAnswers {
            preferred_intake_month: Some("January".to_string()),
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).intake,
            Some(IntakeTimeframe::WithinYear)
        );
    }

    #[test]
    fn flexible_flag_overrides_preferred_month() {
        let answers = IntakeAnswers {
            flexible_intake: Some(true),
            preferred_intake_month: Some("April".to_string()),
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).intake,
            Some(IntakeTimeframe::Flexible)
        );
    }

    #[test]
    fn interests_are_normalized_deduplicated_and_capped() {
        let answers = IntakeAnswers {
            interests: vec![
                "Computer Science".to_string(),
                "computer_science".to_string(),
                "Business".to_string(),
                "Design".to_string(),
                "Health".to_string(),
            ],
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).interests,
            Some(vec![
                "computer_science".to_string(),
                "business".to_string(),
                "design".to_string(),
            ])
        );
    }

    #[test]
    fn test_score_outranks_self_rating() {
        let answers = IntakeAnswers {
            language_self_rating: Some("beginner".to_string()),
            language_test_score: Some(82),
            ..IntakeAnswers::default()
        };
        assert_eq!(
            profile_from_answers(&answers, today()).language,
            Some(LanguageProficiency::Advanced)
        );
    }

    #[test]
    fn unparsable_answers_stay_unanswered() {
        let answers = IntakeAnswers {
            study_stage: Some("postdoc".to_string()),
            academic_result: Some("legendary".to_string()),
            preferred_intake_month: Some("smarch".to_string()),
            ..IntakeAnswers::default()
        };
        let profile = profile_from_answers(&answers, today());
        assert!(profile.stage.is_none());
        assert!(profile.academic.is_none());
        assert!(profile.intake.is_none());
    }
}
