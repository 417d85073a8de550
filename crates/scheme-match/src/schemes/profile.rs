use serde::{Deserialize, Serialize};

use super::domain::RuleField;
use super::states::canonical_state;

/// Upper bound accepted by the intake form.
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    Salaried,
    SelfEmployed,
    Farmer,
    Student,
    Unemployed,
    Retired,
    Homemaker,
}

impl Occupation {
    pub const ALL: [Self; 7] = [
        Self::Salaried,
        Self::SelfEmployed,
        Self::Farmer,
        Self::Student,
        Self::Unemployed,
        Self::Retired,
        Self::Homemaker,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Salaried => "salaried",
            Self::SelfEmployed => "self-employed",
            Self::Farmer => "farmer",
            Self::Student => "student",
            Self::Unemployed => "unemployed",
            Self::Retired => "retired",
            Self::Homemaker => "homemaker",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasteCategory {
    General,
    Obc,
    Sc,
    St,
    Ews,
}

impl CasteCategory {
    pub const ALL: [Self; 5] = [Self::General, Self::Obc, Self::Sc, Self::St, Self::Ews];

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Obc => "obc",
            Self::Sc => "sc",
            Self::St => "st",
            Self::Ews => "ews",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityStatus {
    #[default]
    None,
    Physical,
    Visual,
    Hearing,
    Intellectual,
    Multiple,
}

impl DisabilityStatus {
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Physical,
        Self::Visual,
        Self::Hearing,
        Self::Intellectual,
        Self::Multiple,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Physical => "physical",
            Self::Visual => "visual",
            Self::Hearing => "hearing",
            Self::Intellectual => "intellectual",
            Self::Multiple => "multiple",
        }
    }
}

/// Applicant-declared attributes as collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub age: u32,
    pub annual_income: u64,
    pub gender: Gender,
    pub occupation: Occupation,
    #[serde(default)]
    pub caste_category: Option<CasteCategory>,
    pub state: String,
    pub disability_status: DisabilityStatus,
    pub household_members: u32,
}

/// Validated applicant profile consumed by the eligibility engine.
///
/// Construct through `TryFrom<ProfileSubmission>`; the state is stored in its
/// canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    age: u32,
    annual_income: u64,
    gender: Gender,
    occupation: Occupation,
    caste_category: Option<CasteCategory>,
    state: &'static str,
    disability_status: DisabilityStatus,
    household_members: u32,
}

impl Profile {
    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn annual_income(&self) -> u64 {
        self.annual_income
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn occupation(&self) -> Occupation {
        self.occupation
    }

    pub fn caste_category(&self) -> Option<CasteCategory> {
        self.caste_category
    }

    pub fn state(&self) -> &'static str {
        self.state
    }

    pub fn disability_status(&self) -> DisabilityStatus {
        self.disability_status
    }

    pub fn household_members(&self) -> u32 {
        self.household_members
    }

    pub(crate) fn value(&self, field: RuleField) -> ProfileValue {
        match field {
            RuleField::Age => ProfileValue::Integer(i64::from(self.age)),
            RuleField::Income => {
                ProfileValue::Integer(i64::try_from(self.annual_income).unwrap_or(i64::MAX))
            }
            RuleField::HouseholdSize => ProfileValue::Integer(i64::from(self.household_members)),
            RuleField::Gender => ProfileValue::Text(self.gender.label()),
            RuleField::CasteCategory => match self.caste_category {
                Some(category) => ProfileValue::Text(category.label()),
                None => ProfileValue::Missing,
            },
            RuleField::State => ProfileValue::Text(self.state),
            RuleField::Occupation => ProfileValue::Text(self.occupation.label()),
            RuleField::Disability => ProfileValue::Text(self.disability_status.label()),
        }
    }
}

/// Canonical spelling of a categorical rule value, matching the labels a
/// [`Profile`] reports. `None` for unknown values and non-categorical fields.
pub(crate) fn canonical_label(field: RuleField, raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    let labels: Vec<&'static str> = match field {
        RuleField::Gender => Gender::ALL.iter().map(|value| value.label()).collect(),
        RuleField::CasteCategory => CasteCategory::ALL.iter().map(|value| value.label()).collect(),
        RuleField::Occupation => Occupation::ALL.iter().map(|value| value.label()).collect(),
        RuleField::Disability => DisabilityStatus::ALL
            .iter()
            .map(|value| value.label())
            .collect(),
        RuleField::Age | RuleField::Income | RuleField::HouseholdSize | RuleField::State => {
            return None
        }
    };
    labels
        .into_iter()
        .find(|label| label.eq_ignore_ascii_case(raw))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProfileValue {
    Integer(i64),
    Text(&'static str),
    Missing,
}

impl TryFrom<ProfileSubmission> for Profile {
    type Error = ProfileError;

    fn try_from(submission: ProfileSubmission) -> Result<Self, Self::Error> {
        if submission.age > MAX_AGE {
            return Err(ProfileError::AgeOutOfRange {
                age: submission.age,
            });
        }

        if submission.household_members == 0 {
            return Err(ProfileError::EmptyHousehold);
        }

        let state = canonical_state(&submission.state).ok_or_else(|| {
            ProfileError::UnknownState {
                state: submission.state.clone(),
            }
        })?;

        Ok(Self {
            age: submission.age,
            annual_income: submission.annual_income,
            gender: submission.gender,
            occupation: submission.occupation,
            caste_category: submission.caste_category,
            state,
            disability_status: submission.disability_status,
            household_members: submission.household_members,
        })
    }
}

/// Intake errors for values the form should never have let through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("age {age} exceeds the supported maximum of {MAX_AGE}")]
    AgeOutOfRange { age: u32 },
    #[error("household must have at least one member")]
    EmptyHousehold,
    #[error("'{state}' is not a known state or union territory")]
    UnknownState { state: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ProfileSubmission {
        ProfileSubmission {
            age: 30,
            annual_income: 50_000,
            gender: Gender::Female,
            occupation: Occupation::SelfEmployed,
            caste_category: None,
            state: "bihar".to_string(),
            disability_status: DisabilityStatus::None,
            household_members: 4,
        }
    }

    #[test]
    fn canonicalises_state_name() {
        let profile = Profile::try_from(submission()).expect("valid profile");
        assert_eq!(profile.state(), "Bihar");
        assert_eq!(profile.value(RuleField::State), ProfileValue::Text("Bihar"));
    }

    #[test]
    fn missing_caste_category_is_reported_as_missing() {
        let profile = Profile::try_from(submission()).expect("valid profile");
        assert_eq!(
            profile.value(RuleField::CasteCategory),
            ProfileValue::Missing
        );
        assert_eq!(
            profile.value(RuleField::Occupation),
            ProfileValue::Text("self-employed")
        );
    }

    #[test]
    fn rejects_unknown_state() {
        let mut raw = submission();
        raw.state = "Atlantis".to_string();
        let err = Profile::try_from(raw).expect_err("unknown state rejected");
        assert!(matches!(err, ProfileError::UnknownState { .. }));
    }

    #[test]
    fn rejects_empty_household_and_implausible_age() {
        let mut raw = submission();
        raw.household_members = 0;
        assert_eq!(
            Profile::try_from(raw).expect_err("empty household"),
            ProfileError::EmptyHousehold
        );

        let mut raw = submission();
        raw.age = 150;
        assert_eq!(
            Profile::try_from(raw).expect_err("age bound"),
            ProfileError::AgeOutOfRange { age: 150 }
        );
    }

    #[test]
    fn deserialises_form_labels() {
        let raw = serde_json::json!({
            "age": 45,
            "annual_income": 120000,
            "gender": "male",
            "occupation": "self-employed",
            "caste_category": "obc",
            "state": "Kerala",
            "disability_status": "visual",
            "household_members": 3
        });
        let submission: ProfileSubmission = serde_json::from_value(raw).expect("deserialises");
        assert_eq!(submission.occupation, Occupation::SelfEmployed);
        assert_eq!(submission.caste_category, Some(CasteCategory::Obc));
    }
}
