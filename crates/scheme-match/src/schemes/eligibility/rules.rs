use super::super::domain::{Constraint, EligibilityRule, FieldKind, RuleField, RuleValue, SchemeId};
use super::super::profile::{Profile, ProfileValue};
use super::SchemaError;

/// Outcome of checking one declared rule against a profile.
pub(crate) struct RuleOutcome {
    pub field: RuleField,
    pub matched: bool,
    pub discriminating: bool,
    pub note: Option<String>,
}

pub(crate) fn check_rule(
    profile: &Profile,
    scheme_id: &SchemeId,
    rule: &EligibilityRule,
) -> Result<RuleOutcome, SchemaError> {
    check_types(rule).map_err(|detail| SchemaError {
        scheme_id: scheme_id.clone(),
        field: rule.field,
        detail,
    })?;

    let actual = profile.value(rule.field);
    let matched = match &rule.constraint {
        Constraint::Wildcard => true,
        Constraint::Exact(expected) => value_matches(actual, expected),
        Constraint::Range(min, max) => within(actual, min, max),
        Constraint::OneOf(allowed) => allowed
            .iter()
            .any(|expected| value_matches(actual, expected)),
    };

    let note = (!matched).then(|| {
        format!(
            "{}: {} does not satisfy {}",
            rule.field.label(),
            describe(actual),
            rule.constraint
        )
    });

    Ok(RuleOutcome {
        field: rule.field,
        matched,
        discriminating: rule.constraint.is_discriminating(),
        note,
    })
}

/// Reject constraints whose value types cannot be compared with the profile
/// attribute. Checked before matching so the outcome never depends on the
/// applicant's answers.
fn check_types(rule: &EligibilityRule) -> Result<(), String> {
    let values: Vec<&RuleValue> = match &rule.constraint {
        Constraint::Wildcard => return Ok(()),
        Constraint::Exact(value) => vec![value],
        Constraint::Range(min, max) => {
            if rule.field.kind() == FieldKind::Categorical {
                return Err(format!(
                    "categorical field '{}' cannot be constrained by a range",
                    rule.field
                ));
            }
            vec![min, max]
        }
        Constraint::OneOf(values) => values.iter().collect(),
    };

    let expected = match rule.field.kind() {
        FieldKind::Numeric => "integer",
        FieldKind::Categorical => "text",
    };

    match values.into_iter().find(|value| value.type_name() != expected) {
        Some(value) => Err(format!(
            "field '{}' expects {expected} values but the rule declares {} value '{value}'",
            rule.field,
            value.type_name()
        )),
        None => Ok(()),
    }
}

fn value_matches(actual: ProfileValue, expected: &RuleValue) -> bool {
    match (actual, expected) {
        (ProfileValue::Integer(value), RuleValue::Integer(expected)) => value == *expected,
        (ProfileValue::Text(value), RuleValue::Text(expected)) => {
            value.eq_ignore_ascii_case(expected.trim())
        }
        _ => false,
    }
}

fn within(actual: ProfileValue, min: &RuleValue, max: &RuleValue) -> bool {
    match (actual, min, max) {
        (ProfileValue::Integer(value), RuleValue::Integer(min), RuleValue::Integer(max)) => {
            *min <= value && value <= *max
        }
        _ => false,
    }
}

fn describe(actual: ProfileValue) -> String {
    match actual {
        ProfileValue::Integer(value) => value.to_string(),
        ProfileValue::Text(value) => value.to_string(),
        ProfileValue::Missing => "not declared".to_string(),
    }
}
