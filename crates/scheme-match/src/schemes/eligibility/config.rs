use serde::{Deserialize, Serialize};

/// How a ranking call treats schemes whose rules cannot be compared with the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorPolicy {
    /// Leave the scheme out of the results and report it alongside them.
    #[default]
    Omit,
    /// Fail the whole call on the first defective scheme in catalog order.
    Strict,
}

impl SchemaErrorPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "omit" | "lenient" => Some(Self::Omit),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Omit => "omit",
            Self::Strict => "strict",
        }
    }
}

/// Engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub schema_error_policy: SchemaErrorPolicy,
}
