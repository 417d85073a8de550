use metrics_exporter_prometheus::PrometheusHandle;
use scheme_match::error::AppError;
use scheme_match::schemes::{Catalog, SchemaErrorPolicy};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog from `path`, or the built-in catalog when none is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    let catalog = match path {
        Some(path) => {
            info!(path = %path.display(), "loading scheme catalog");
            Catalog::from_path(path)?
        }
        None => Catalog::standard()?,
    };
    Ok(catalog)
}

/// Parse a CLI value using the same snake/kebab-case spelling as the JSON API.
pub(crate) fn parse_choice<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    serde_json::from_value(serde_json::Value::String(normalized.clone()))
        .map_err(|_| format!("'{normalized}' is not a recognised value"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<SchemaErrorPolicy, String> {
    SchemaErrorPolicy::parse(raw).ok_or_else(|| format!("'{raw}' is not 'omit' or 'strict'"))
}
