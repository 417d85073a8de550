use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::catalog::{Catalog, SchemeFilter};
use super::documents::required_documents;
use super::domain::{SchemeId, SchemeSummary};
use super::eligibility::{EligibilityConfig, EligibilityEngine, SchemaError};
use super::profile::{Profile, ProfileError, ProfileSubmission};
use super::views::{MatchReport, SchemeDetailView, SchemeMatchView};

/// Service composing the catalog snapshot and the eligibility engine.
///
/// Each call works against one `Arc<Catalog>` snapshot; `replace_catalog`
/// swaps the snapshot without disturbing evaluations already in flight.
pub struct SchemeMatchService {
    catalog: RwLock<Arc<Catalog>>,
    engine: EligibilityEngine,
}

impl SchemeMatchService {
    pub fn new(catalog: Catalog, config: EligibilityConfig) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
            engine: EligibilityEngine::new(config),
        }
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace_catalog(&self, catalog: Catalog) {
        let schemes = catalog.len();
        *self
            .catalog
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
        info!(schemes, "scheme catalog snapshot replaced");
    }

    /// Rank every scheme for a submitted profile.
    pub fn rank(&self, submission: ProfileSubmission) -> Result<MatchReport, MatchServiceError> {
        let profile = Profile::try_from(submission)?;
        let catalog = self.catalog();
        let ranking = self.engine.rank_for_profile(&profile, &catalog)?;

        let eligible_count = ranking.eligible_count();
        let mut matches = Vec::with_capacity(ranking.results.len());
        for result in ranking.results {
            let scheme = catalog
                .get(&result.scheme_id)
                .ok_or_else(|| MatchServiceError::UnknownScheme(result.scheme_id.clone()))?;
            matches.push(SchemeMatchView {
                scheme: scheme.summary(),
                result,
            });
        }

        Ok(MatchReport {
            evaluated: catalog.len(),
            eligible_count,
            matches,
            rejected: ranking.rejected,
        })
    }

    /// Evaluate a single scheme, for the detail page's eligibility card.
    pub fn evaluate_scheme(
        &self,
        scheme_id: &SchemeId,
        submission: ProfileSubmission,
    ) -> Result<SchemeMatchView, MatchServiceError> {
        let profile = Profile::try_from(submission)?;
        let catalog = self.catalog();
        let scheme = catalog
            .get(scheme_id)
            .ok_or_else(|| MatchServiceError::UnknownScheme(scheme_id.clone()))?;
        let result = self.engine.evaluate(&profile, scheme)?;

        Ok(SchemeMatchView {
            scheme: scheme.summary(),
            result,
        })
    }

    pub fn scheme_detail(&self, scheme_id: &SchemeId) -> Result<SchemeDetailView, MatchServiceError> {
        let catalog = self.catalog();
        let scheme = catalog
            .get(scheme_id)
            .ok_or_else(|| MatchServiceError::UnknownScheme(scheme_id.clone()))?;

        Ok(SchemeDetailView {
            scheme_type_label: scheme.scheme_type.label(),
            required_documents: required_documents(scheme),
            scheme: scheme.clone(),
        })
    }

    pub fn list(&self, filter: &SchemeFilter) -> Vec<SchemeSummary> {
        self.catalog()
            .filter(filter)
            .map(|scheme| scheme.summary())
            .collect()
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("scheme '{0}' not found")]
    UnknownScheme(SchemeId),
}
