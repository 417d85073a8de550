mod import;
mod record;

pub use record::{SchemeRecord, ValidationError, ValidationIssue};

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::domain::{Scheme, SchemeId, SchemeType};
use super::states::canonical_state;

const STANDARD_CATALOG: &str = include_str!("../../../data/standard_catalog.json");

/// Two records in one batch share an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scheme id '{scheme_id}' declared by record #{first_index} and again by record #{duplicate_index}")]
pub struct DuplicateIdError {
    pub scheme_id: SchemeId,
    pub first_index: usize,
    pub duplicate_index: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported catalog file extension '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// Immutable, order-preserving snapshot of the schemes available for evaluation.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    schemes: Vec<Scheme>,
    positions: HashMap<SchemeId, usize>,
}

/// Validate a batch of records into a catalog.
///
/// The batch is accepted or rejected as a whole: the first malformed record
/// or repeated identifier fails the load.
pub fn load_catalog<I>(records: I) -> Result<Catalog, CatalogError>
where
    I: IntoIterator<Item = SchemeRecord>,
{
    let mut schemes = Vec::new();
    let mut positions = HashMap::new();

    for (index, record) in records.into_iter().enumerate() {
        let scheme = record.into_scheme(index)?;
        if let Some(&first_index) = positions.get(&scheme.id) {
            return Err(DuplicateIdError {
                scheme_id: scheme.id,
                first_index,
                duplicate_index: index,
            }
            .into());
        }
        positions.insert(scheme.id.clone(), index);
        schemes.push(scheme);
    }

    info!(schemes = schemes.len(), "scheme catalog loaded");
    Ok(Catalog { schemes, positions })
}

impl Catalog {
    /// Built-in sample catalog shipped with the crate.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json_reader(STANDARD_CATALOG.as_bytes())
    }

    /// Load a JSON array of scheme records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let records: Vec<SchemeRecord> = serde_json::from_reader(reader)?;
        load_catalog(records)
    }

    /// Load a flat CSV scheme table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        load_catalog(import::parse_rows(reader)?)
    }

    /// Load a `.json` or `.csv` catalog file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_reader(File::open(path)?),
            "csv" => Self::from_csv_reader(File::open(path)?),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Every scheme in declaration order.
    pub fn all_schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn get(&self, id: &SchemeId) -> Option<&Scheme> {
        self.positions.get(id).map(|&index| &self.schemes[index])
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Browse view over the catalog, preserving declaration order.
    pub fn filter<'a>(&'a self, filter: &'a SchemeFilter) -> impl Iterator<Item = &'a Scheme> + 'a {
        self.schemes.iter().filter(move |scheme| filter.matches(scheme))
    }
}

/// Criteria for the scheme browse listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SchemeFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub scheme_type: Option<SchemeType>,
    /// Matches schemes restricted to this state as well as nationwide ones.
    #[serde(default)]
    pub state: Option<String>,
}

impl SchemeFilter {
    pub fn matches(&self, scheme: &Scheme) -> bool {
        if let Some(category) = &self.category {
            if !scheme.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }

        if let Some(scheme_type) = self.scheme_type {
            if scheme.scheme_type != scheme_type {
                return false;
            }
        }

        if let Some(state) = &self.state {
            let wanted = canonical_state(state).unwrap_or(state.trim());
            if let Some(states) = scheme.restricted_states() {
                return states.iter().any(|allowed| allowed.eq_ignore_ascii_case(wanted));
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(raw: serde_json::Value) -> Vec<SchemeRecord> {
        serde_json::from_value(raw).expect("records deserialise")
    }

    fn open_record(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Scheme {id}"),
            "type": "central",
            "category": "Welfare",
            "age_range": "any",
            "income_range": "any",
            "gender": "any",
            "caste_category": "any",
            "state": "any"
        })
    }

    #[test]
    fn standard_catalog_loads() {
        let catalog = Catalog::standard().expect("built-in catalog is valid");
        assert!(!catalog.is_empty());
        let first = &catalog.all_schemes()[0];
        assert_eq!(catalog.get(&first.id), Some(first));
    }

    #[test]
    fn preserves_declaration_order() {
        let catalog = load_catalog(records(json!([
            open_record("c"),
            open_record("a"),
            open_record("b")
        ])))
        .expect("catalog loads");

        let ids: Vec<_> = catalog
            .all_schemes()
            .iter()
            .map(|scheme| scheme.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicate_ids_reject_the_whole_batch() {
        let err = load_catalog(records(json!([
            open_record("a"),
            open_record("b"),
            open_record("a")
        ])))
        .expect_err("duplicate rejected");

        match err {
            CatalogError::DuplicateId(duplicate) => {
                assert_eq!(duplicate.scheme_id, SchemeId::from("a"));
                assert_eq!(duplicate.first_index, 0);
                assert_eq!(duplicate.duplicate_index, 2);
            }
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn inverted_range_fails_with_validation_error() {
        let mut bad = open_record("inverted");
        bad["age_range"] = json!({ "min": 65, "max": 18 });
        let err = load_catalog(records(json!([open_record("ok"), bad]))).expect_err("rejected");

        match err {
            CatalogError::Validation(validation) => {
                assert_eq!(validation.index, 1);
                assert!(matches!(
                    validation.issue,
                    ValidationIssue::InvertedRange { min: 65, max: 18, .. }
                ));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn csv_catalog_uses_flat_columns() {
        let table = "id,scheme_name,type,category,min_age,max_age,min_income,max_income,gender,caste,state\n\
farmer-support,Farmer Support Scheme,central,Agriculture,18,65,0,200000,any,any,any\n";
        let catalog = Catalog::from_csv_reader(table.as_bytes()).expect("csv catalog loads");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all_schemes()[0].rules.len(), 5);
    }

    #[test]
    fn csv_catalog_reports_inverted_ranges() {
        let table = "id,scheme_name,type,min_age,max_age,min_income,max_income,gender,caste,state\n\
bad,Bad Scheme,central,65,18,0,1000,any,any,any\n";
        let err = Catalog::from_csv_reader(table.as_bytes()).expect_err("rejected");
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn filter_matches_state_restrictions_and_nationwide_schemes() {
        let mut bihar = open_record("bihar-only");
        bihar["state"] = json!("Bihar");
        bihar["type"] = json!("state");
        bihar["category"] = json!("Education");
        let catalog = load_catalog(records(json!([open_record("nationwide"), bihar])))
            .expect("catalog loads");

        let in_kerala = SchemeFilter {
            state: Some("kerala".to_string()),
            ..SchemeFilter::default()
        };
        let ids: Vec<_> = catalog
            .filter(&in_kerala)
            .map(|scheme| scheme.id.as_str())
            .collect();
        assert_eq!(ids, vec!["nationwide"]);

        let state_education = SchemeFilter {
            category: Some("education".to_string()),
            scheme_type: Some(SchemeType::State),
            state: Some("Bihar".to_string()),
        };
        let ids: Vec<_> = catalog
            .filter(&state_education)
            .map(|scheme| scheme.id.as_str())
            .collect();
        assert_eq!(ids, vec!["bihar-only"]);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = Catalog::from_path("schemes.yaml").expect_err("yaml unsupported");
        assert!(matches!(err, CatalogError::UnsupportedFormat(ext) if ext == "yaml"));
    }
}
