use std::cmp::Ordering;

use tracing::{debug, warn};

use super::super::catalog::Catalog;
use super::super::domain::Scheme;
use super::super::profile::Profile;
use super::config::SchemaErrorPolicy;
use super::{evaluate, EligibilityResult, Ranking, SchemaError};

/// Catalogs smaller than this are evaluated on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 64;

pub(crate) fn rank_for_profile(
    profile: &Profile,
    catalog: &Catalog,
    policy: SchemaErrorPolicy,
) -> Result<Ranking, SchemaError> {
    let outcomes = evaluate_all(profile, catalog.all_schemes());

    let mut results = Vec::with_capacity(outcomes.len());
    let mut rejected = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) if policy == SchemaErrorPolicy::Strict => return Err(err),
            Err(err) => {
                warn!(
                    scheme_id = %err.scheme_id,
                    field = %err.field,
                    "scheme omitted from ranking: {}",
                    err.detail
                );
                rejected.push(err);
            }
        }
    }

    // Stable sort keeps catalog order for equal (eligible, score) pairs.
    results.sort_by(compare_results);

    debug!(
        evaluated = results.len(),
        eligible = results.iter().filter(|result| result.eligible).count(),
        rejected = rejected.len(),
        "ranked catalog for profile"
    );

    Ok(Ranking { results, rejected })
}

fn compare_results(a: &EligibilityResult, b: &EligibilityResult) -> Ordering {
    b.eligible
        .cmp(&a.eligible)
        .then_with(|| b.score.total_cmp(&a.score))
}

/// Outcomes are returned in catalog order regardless of how they were computed.
#[cfg(feature = "parallel")]
fn evaluate_all(
    profile: &Profile,
    schemes: &[Scheme],
) -> Vec<Result<EligibilityResult, SchemaError>> {
    use rayon::prelude::*;

    if schemes.len() < PARALLEL_THRESHOLD {
        return evaluate_sequential(profile, schemes);
    }

    schemes
        .par_iter()
        .map(|scheme| evaluate(profile, scheme))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(
    profile: &Profile,
    schemes: &[Scheme],
) -> Vec<Result<EligibilityResult, SchemaError>> {
    evaluate_sequential(profile, schemes)
}

fn evaluate_sequential(
    profile: &Profile,
    schemes: &[Scheme],
) -> Vec<Result<EligibilityResult, SchemaError>> {
    schemes
        .iter()
        .map(|scheme| evaluate(profile, scheme))
        .collect()
}
