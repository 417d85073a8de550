use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog schemes, used as the join key for results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeId(pub String);

impl SchemeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Whether a scheme is run by the union government or a single state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeType {
    Central,
    State,
}

impl SchemeType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Central => "Central",
            Self::State => "State",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "central" => Some(Self::Central),
            "state" => Some(Self::State),
            _ => None,
        }
    }
}

/// Profile attribute a rule constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    Age,
    Income,
    Gender,
    CasteCategory,
    State,
    Occupation,
    Disability,
    HouseholdSize,
}

impl RuleField {
    /// Fields every catalog record must declare, in their canonical order.
    pub const fn required() -> [Self; 5] {
        [
            Self::Age,
            Self::Income,
            Self::Gender,
            Self::CasteCategory,
            Self::State,
        ]
    }

    pub const fn optional() -> [Self; 3] {
        [Self::Occupation, Self::Disability, Self::HouseholdSize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Income => "income",
            Self::Gender => "gender",
            Self::CasteCategory => "caste_category",
            Self::State => "state",
            Self::Occupation => "occupation",
            Self::Disability => "disability",
            Self::HouseholdSize => "household_size",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Income => "Annual income",
            Self::Gender => "Gender",
            Self::CasteCategory => "Caste category",
            Self::State => "State",
            Self::Occupation => "Occupation",
            Self::Disability => "Disability status",
            Self::HouseholdSize => "Household size",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Age | Self::Income | Self::HouseholdSize => FieldKind::Numeric,
            Self::Gender
            | Self::CasteCategory
            | Self::State
            | Self::Occupation
            | Self::Disability => FieldKind::Categorical,
        }
    }
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// Scalar carried by a rule constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Integer(i64),
    Text(String),
}

impl RuleValue {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            RuleValue::Integer(_) => "integer",
            RuleValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Integer(value) => write!(f, "{value}"),
            RuleValue::Text(value) => f.write_str(value),
        }
    }
}

/// Restriction a scheme places on one profile attribute.
///
/// `Wildcard` replaces the `"any"` literal of catalog sources: it never
/// discriminates between applicants and is excluded from scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Constraint<T> {
    Wildcard,
    Exact(T),
    Range(T, T),
    OneOf(Vec<T>),
}

impl<T> Constraint<T> {
    pub fn is_discriminating(&self) -> bool {
        !matches!(self, Constraint::Wildcard)
    }
}

impl fmt::Display for Constraint<RuleValue> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Wildcard => f.write_str("any"),
            Constraint::Exact(value) => write!(f, "{value}"),
            Constraint::Range(min, max) => write!(f, "{min} to {max}"),
            Constraint::OneOf(values) => {
                let joined = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "one of [{joined}]")
            }
        }
    }
}

/// One declared eligibility criterion of a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRule {
    pub field: RuleField,
    pub constraint: Constraint<RuleValue>,
}

impl EligibilityRule {
    pub fn new(field: RuleField, constraint: Constraint<RuleValue>) -> Self {
        Self { field, constraint }
    }
}

/// Catalog entry for one welfare programme and its rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub title: String,
    pub description: String,
    pub ministry: String,
    pub benefits: String,
    pub scheme_type: SchemeType,
    pub category: String,
    /// Declaration order is preserved for display.
    pub rules: Vec<EligibilityRule>,
}

impl Scheme {
    pub fn rule(&self, field: RuleField) -> Option<&EligibilityRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// States the scheme is restricted to, or `None` when open nationwide.
    pub fn restricted_states(&self) -> Option<Vec<&str>> {
        let rule = self.rule(RuleField::State)?;
        match &rule.constraint {
            Constraint::Exact(RuleValue::Text(state)) => Some(vec![state.as_str()]),
            Constraint::OneOf(values) => Some(
                values
                    .iter()
                    .filter_map(|value| match value {
                        RuleValue::Text(state) => Some(state.as_str()),
                        RuleValue::Integer(_) => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn summary(&self) -> SchemeSummary {
        SchemeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            scheme_type: self.scheme_type,
            scheme_type_label: self.scheme_type.label(),
            category: self.category.clone(),
            ministry: self.ministry.clone(),
            benefits: self.benefits.clone(),
        }
    }
}

/// Listing view of a scheme for browse pages and ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeSummary {
    pub id: SchemeId,
    pub title: String,
    pub scheme_type: SchemeType,
    pub scheme_type_label: &'static str,
    pub category: String,
    pub ministry: String,
    pub benefits: String,
}
