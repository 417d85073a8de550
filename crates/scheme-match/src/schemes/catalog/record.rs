use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::super::domain::{
    Constraint, EligibilityRule, FieldKind, RuleField, RuleValue, Scheme, SchemeId, SchemeType,
};
use super::super::profile::canonical_label;
use super::super::states::canonical_state;

const WILDCARD: &str = "any";

/// Raw catalog record as supplied by a data store or static configuration.
///
/// Rule fields stay untyped here so every malformed value is reported by
/// [`SchemeRecord::into_scheme`] instead of failing inside the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, alias = "scheme_name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default, rename = "type", alias = "scheme_type")]
    pub scheme_type: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub age_range: Option<Value>,
    #[serde(default)]
    pub income_range: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default, alias = "caste")]
    pub caste_category: Option<Value>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub occupation: Option<Value>,
    #[serde(default)]
    pub disability: Option<Value>,
    #[serde(default)]
    pub household_size: Option<Value>,
}

/// Rejection of a single malformed record at catalog load time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("scheme record #{index}{}: {issue}", describe_id(.scheme_id))]
pub struct ValidationError {
    pub index: usize,
    pub scheme_id: Option<SchemeId>,
    pub issue: ValidationIssue,
}

fn describe_id(scheme_id: &Option<SchemeId>) -> String {
    scheme_id
        .as_ref()
        .map(|id| format!(" ({id})"))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("missing scheme id")]
    MissingId,
    #[error("missing title")]
    MissingTitle,
    #[error("missing scheme type")]
    MissingSchemeType,
    #[error("unknown scheme type '{0}'")]
    UnknownSchemeType(String),
    #[error("missing required rule '{0}'")]
    MissingRule(RuleField),
    #[error("rule '{field}' has unsupported {found} value")]
    UnsupportedValue {
        field: RuleField,
        found: &'static str,
    },
    #[error("rule '{field}' has an empty value")]
    EmptyValue { field: RuleField },
    #[error("rule '{field}' declares an empty allow-list")]
    EmptyAllowList { field: RuleField },
    #[error("rule '{field}' mixes the wildcard into an allow-list or range")]
    MisplacedWildcard { field: RuleField },
    #[error("rule '{field}' range must declare both min and max")]
    IncompleteRange { field: RuleField },
    #[error("rule '{field}' range bounds have different types")]
    MixedRangeBounds { field: RuleField },
    #[error("rule '{field}' range is inverted (min {min} > max {max})")]
    InvertedRange { field: RuleField, min: i64, max: i64 },
    #[error("'{0}' is not a known state or union territory")]
    UnknownState(String),
    #[error("rule '{field}' value '{value}' is not a recognised {field}")]
    UnknownValue { field: RuleField, value: String },
}

impl SchemeRecord {
    fn rule_value(&self, field: RuleField) -> Option<&Value> {
        match field {
            RuleField::Age => self.age_range.as_ref(),
            RuleField::Income => self.income_range.as_ref(),
            RuleField::Gender => self.gender.as_ref(),
            RuleField::CasteCategory => self.caste_category.as_ref(),
            RuleField::State => self.state.as_ref(),
            RuleField::Occupation => self.occupation.as_ref(),
            RuleField::Disability => self.disability.as_ref(),
            RuleField::HouseholdSize => self.household_size.as_ref(),
        }
    }

    /// Validate the record and convert it into a typed scheme.
    ///
    /// Structural defects are rejected here. Whether a value's type fits the
    /// profile attribute is checked by the eligibility engine.
    pub fn into_scheme(self, index: usize) -> Result<Scheme, ValidationError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ValidationError {
                index,
                scheme_id: None,
                issue: ValidationIssue::MissingId,
            });
        }
        let scheme_id = SchemeId(id.to_string());
        let reject = |issue: ValidationIssue| ValidationError {
            index,
            scheme_id: Some(scheme_id.clone()),
            issue,
        };

        if self.title.trim().is_empty() {
            return Err(reject(ValidationIssue::MissingTitle));
        }

        let scheme_type = match self.scheme_type.as_deref().map(str::trim) {
            None | Some("") => return Err(reject(ValidationIssue::MissingSchemeType)),
            Some(raw) => SchemeType::parse(raw)
                .ok_or_else(|| reject(ValidationIssue::UnknownSchemeType(raw.to_string())))?,
        };

        let mut rules = Vec::new();
        for field in RuleField::required() {
            let value = self
                .rule_value(field)
                .ok_or_else(|| reject(ValidationIssue::MissingRule(field)))?;
            rules.push(EligibilityRule::new(
                field,
                parse_constraint(field, value).map_err(&reject)?,
            ));
        }
        for field in RuleField::optional() {
            if let Some(value) = self.rule_value(field) {
                rules.push(EligibilityRule::new(
                    field,
                    parse_constraint(field, value).map_err(&reject)?,
                ));
            }
        }

        Ok(Scheme {
            id: scheme_id.clone(),
            title: self.title.trim().to_string(),
            description: self.description,
            ministry: self.ministry,
            benefits: self.benefits,
            scheme_type,
            category: self.category.trim().to_string(),
            rules,
        })
    }
}

fn parse_constraint(
    field: RuleField,
    value: &Value,
) -> Result<Constraint<RuleValue>, ValidationIssue> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                return Err(ValidationIssue::EmptyAllowList { field });
            }
            let values = items
                .iter()
                .map(|item| concrete_scalar(field, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Constraint::OneOf(values))
        }
        Value::Object(bounds) => parse_range(field, bounds),
        scalar => match parse_scalar(field, scalar)? {
            Some(value) => Ok(Constraint::Exact(value)),
            None => Ok(Constraint::Wildcard),
        },
    }
}

fn parse_range(
    field: RuleField,
    bounds: &Map<String, Value>,
) -> Result<Constraint<RuleValue>, ValidationIssue> {
    if bounds.keys().any(|key| key != "min" && key != "max") {
        return Err(ValidationIssue::UnsupportedValue {
            field,
            found: "object",
        });
    }

    let (Some(min), Some(max)) = (bounds.get("min"), bounds.get("max")) else {
        return Err(ValidationIssue::IncompleteRange { field });
    };

    let min = concrete_scalar(field, min)?;
    let max = concrete_scalar(field, max)?;

    match (&min, &max) {
        (RuleValue::Integer(low), RuleValue::Integer(high)) if low > high => {
            Err(ValidationIssue::InvertedRange {
                field,
                min: *low,
                max: *high,
            })
        }
        (RuleValue::Integer(_), RuleValue::Text(_)) | (RuleValue::Text(_), RuleValue::Integer(_)) => {
            Err(ValidationIssue::MixedRangeBounds { field })
        }
        _ => Ok(Constraint::Range(min, max)),
    }
}

fn concrete_scalar(field: RuleField, value: &Value) -> Result<RuleValue, ValidationIssue> {
    parse_scalar(field, value)?.ok_or(ValidationIssue::MisplacedWildcard { field })
}

/// `Ok(None)` marks the wildcard.
fn parse_scalar(field: RuleField, value: &Value) -> Result<Option<RuleValue>, ValidationIssue> {
    match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ValidationIssue::EmptyValue { field });
            }
            if trimmed.eq_ignore_ascii_case(WILDCARD) {
                return Ok(None);
            }
            if field == RuleField::State {
                let state = canonical_state(trimmed)
                    .ok_or_else(|| ValidationIssue::UnknownState(trimmed.to_string()))?;
                return Ok(Some(RuleValue::Text(state.to_string())));
            }
            if field.kind() == FieldKind::Categorical {
                let label = canonical_label(field, trimmed).ok_or_else(|| {
                    ValidationIssue::UnknownValue {
                        field,
                        value: trimmed.to_string(),
                    }
                })?;
                return Ok(Some(RuleValue::Text(label.to_string())));
            }
            Ok(Some(RuleValue::Text(trimmed.to_string())))
        }
        Value::Number(number) => number
            .as_i64()
            .map(|value| Some(RuleValue::Integer(value)))
            .ok_or(ValidationIssue::UnsupportedValue {
                field,
                found: "non-integer number",
            }),
        Value::Null => Err(ValidationIssue::UnsupportedValue {
            field,
            found: "null",
        }),
        Value::Bool(_) => Err(ValidationIssue::UnsupportedValue {
            field,
            found: "boolean",
        }),
        Value::Array(_) => Err(ValidationIssue::UnsupportedValue {
            field,
            found: "nested list",
        }),
        Value::Object(_) => Err(ValidationIssue::UnsupportedValue {
            field,
            found: "nested object",
        }),
    }
}
