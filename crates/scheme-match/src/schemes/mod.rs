//! Welfare scheme catalog, applicant profiles, and the eligibility engine.

pub mod catalog;
pub mod documents;
pub mod domain;
pub mod eligibility;
pub mod profile;
pub mod router;
pub mod service;
pub mod states;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{
    load_catalog, Catalog, CatalogError, DuplicateIdError, SchemeFilter, SchemeRecord,
    ValidationError, ValidationIssue,
};
pub use documents::required_documents;
pub use domain::{
    Constraint, EligibilityRule, FieldKind, RuleField, RuleValue, Scheme, SchemeId,
    SchemeSummary, SchemeType,
};
pub use eligibility::{
    evaluate, rank_for_profile, EligibilityConfig, EligibilityEngine, EligibilityResult,
    Ranking, RuleMatch, RuleMatches, SchemaError, SchemaErrorPolicy,
};
pub use profile::{
    CasteCategory, DisabilityStatus, Gender, Occupation, Profile, ProfileError,
    ProfileSubmission,
};
pub use router::scheme_router;
pub use service::{MatchServiceError, SchemeMatchService};
pub use states::{canonical_state, KNOWN_STATES};
pub use views::{MatchReport, SchemeDetailView, SchemeMatchView};
