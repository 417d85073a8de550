mod config;
mod ranking;
mod rules;

pub use config::{EligibilityConfig, SchemaErrorPolicy};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::catalog::Catalog;
use super::domain::{RuleField, Scheme, SchemeId};
use super::profile::Profile;

/// Stateless evaluator applying the configured error policy to rankings.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        profile: &Profile,
        scheme: &Scheme,
    ) -> Result<EligibilityResult, SchemaError> {
        evaluate(profile, scheme)
    }

    pub fn rank_for_profile(
        &self,
        profile: &Profile,
        catalog: &Catalog,
    ) -> Result<Ranking, SchemaError> {
        rank_for_profile(profile, catalog, self.config.schema_error_policy)
    }
}

/// Evaluate one scheme's declared rules against a profile.
///
/// Only discriminating (non-wildcard) rules decide eligibility and count
/// toward the score; a scheme without any is fully open and scores `1.0`.
pub fn evaluate(profile: &Profile, scheme: &Scheme) -> Result<EligibilityResult, SchemaError> {
    let mut matches = Vec::with_capacity(scheme.rules.len());
    let mut unmet_criteria = Vec::new();
    let mut discriminating = 0usize;
    let mut satisfied = 0usize;

    for rule in &scheme.rules {
        let outcome = rules::check_rule(profile, &scheme.id, rule)?;
        if outcome.discriminating {
            discriminating += 1;
            if outcome.matched {
                satisfied += 1;
            } else if let Some(note) = outcome.note {
                unmet_criteria.push(note);
            }
        }
        matches.push(RuleMatch {
            field: outcome.field,
            matched: outcome.matched,
            discriminating: outcome.discriminating,
        });
    }

    let score = if discriminating == 0 {
        1.0
    } else {
        satisfied as f64 / discriminating as f64
    };

    Ok(EligibilityResult {
        scheme_id: scheme.id.clone(),
        eligible: satisfied == discriminating,
        score,
        rule_matches: RuleMatches(matches),
        unmet_criteria,
    })
}

/// Evaluate every scheme in the catalog and order the results: eligible
/// first, then by score, then by catalog declaration order.
pub fn rank_for_profile(
    profile: &Profile,
    catalog: &Catalog,
    policy: SchemaErrorPolicy,
) -> Result<Ranking, SchemaError> {
    ranking::rank_for_profile(profile, catalog, policy)
}

/// A scheme declares a rule whose value type cannot be compared with the
/// corresponding profile attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("scheme '{scheme_id}' rule '{field}' is malformed: {detail}")]
pub struct SchemaError {
    pub scheme_id: SchemeId,
    pub field: RuleField,
    pub detail: String,
}

/// Per-scheme outcome for one profile. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityResult {
    pub scheme_id: SchemeId,
    pub eligible: bool,
    pub score: f64,
    pub rule_matches: RuleMatches,
    pub unmet_criteria: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub field: RuleField,
    pub matched: bool,
    /// `false` for wildcard rules, which are reported as matched.
    pub discriminating: bool,
}

/// Rule-by-rule breakdown in scheme declaration order.
///
/// Serialises as a JSON object keyed by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMatches(Vec<RuleMatch>);

impl RuleMatches {
    pub fn get(&self, field: RuleField) -> Option<bool> {
        self.0
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.matched)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleMatch> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RuleMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(entry.field.name(), &entry.matched)?;
        }
        map.end()
    }
}

/// Ordered results of one ranking call plus schemes left out under
/// [`SchemaErrorPolicy::Omit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub results: Vec<EligibilityResult>,
    pub rejected: Vec<SchemaError>,
}

impl Ranking {
    pub fn eligible(&self) -> impl Iterator<Item = &EligibilityResult> {
        self.results.iter().filter(|result| result.eligible)
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }
}
