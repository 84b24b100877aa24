use crate::advisor::domain::{
    ConditionCheck, ConditionOutcome, Enforcement, FieldValue, GateCondition, StudentProfile,
};

enum CheckVerdict {
    Satisfied,
    NearMiss,
    Failed,
}

/// Evaluates one gate condition against one profile field.
///
/// An unanswered field is always `Missing`, never a failure. A failed
/// comparison only hard-fails when the condition is required; advisory
/// conditions degrade to `Borderline` and can never sink a gate.
pub(crate) fn evaluate_condition(
    condition: &GateCondition,
    profile: &StudentProfile,
) -> ConditionOutcome {
    let Some(value) = profile.field(condition.field) else {
        return ConditionOutcome::Missing;
    };

    match apply_check(&condition.check, &value) {
        CheckVerdict::Satisfied => ConditionOutcome::Matched,
        CheckVerdict::NearMiss => ConditionOutcome::Borderline,
        CheckVerdict::Failed => match condition.enforcement {
            Enforcement::Required => ConditionOutcome::HardFail,
            Enforcement::Advisory => ConditionOutcome::Borderline,
        },
    }
}

fn apply_check(check: &ConditionCheck, value: &FieldValue) -> CheckVerdict {
    match check {
        ConditionCheck::Equals { expected } => match value.magnitude() {
            Some(actual) if actual == *expected => CheckVerdict::Satisfied,
            _ => CheckVerdict::Failed,
        },
        ConditionCheck::AtLeast { minimum, tolerance } => match value.magnitude() {
            Some(actual) if actual >= *minimum => CheckVerdict::Satisfied,
            Some(actual) if u16::from(actual) + u16::from(*tolerance) >= u16::from(*minimum) => {
                CheckVerdict::NearMiss
            }
            _ => CheckVerdict::Failed,
        },
        ConditionCheck::Within {
            min,
            max,
            tolerance,
        } => match value.magnitude() {
            Some(actual) if actual >= *min && actual <= *max => CheckVerdict::Satisfied,
            Some(actual)
                if u16::from(actual) + u16::from(*tolerance) >= u16::from(*min)
                    && u16::from(actual) <= u16::from(*max) + u16::from(*tolerance) =>
            {
                CheckVerdict::NearMiss
            }
            _ => CheckVerdict::Failed,
        },
        ConditionCheck::SharesTag { options } => match value {
            FieldValue::Tags(tags) => {
                if tags.iter().any(|tag| options.contains(tag)) {
                    CheckVerdict::Satisfied
                } else {
                    CheckVerdict::Failed
                }
            }
            _ => CheckVerdict::Failed,
        },
    }
}
