use serde::Serialize;

use super::domain::{Scheme, SchemeSummary};
use super::eligibility::{EligibilityResult, SchemaError};

/// Eligibility result joined with the scheme's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeMatchView {
    pub scheme: SchemeSummary,
    #[serde(flatten)]
    pub result: EligibilityResult,
}

/// Ranked response for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub evaluated: usize,
    pub eligible_count: usize,
    pub matches: Vec<SchemeMatchView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<SchemaError>,
}

/// Detail page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeDetailView {
    pub scheme: Scheme,
    pub scheme_type_label: &'static str,
    pub required_documents: Vec<String>,
}
