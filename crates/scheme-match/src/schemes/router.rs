use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::catalog::SchemeFilter;
use super::domain::SchemeId;
use super::profile::ProfileSubmission;
use super::service::{MatchServiceError, SchemeMatchService};

/// Router builder exposing catalog browsing and eligibility endpoints.
pub fn scheme_router(service: Arc<SchemeMatchService>) -> Router {
    Router::new()
        .route("/api/v1/schemes", get(list_handler))
        .route("/api/v1/schemes/:scheme_id", get(detail_handler))
        .route(
            "/api/v1/schemes/:scheme_id/eligibility",
            post(evaluate_handler),
        )
        .route("/api/v1/eligibility", post(rank_handler))
        .with_state(service)
}

pub(crate) async fn list_handler(
    State(service): State<Arc<SchemeMatchService>>,
    Query(filter): Query<SchemeFilter>,
) -> Response {
    let schemes = service.list(&filter);
    (
        StatusCode::OK,
        axum::Json(json!({ "count": schemes.len(), "schemes": schemes })),
    )
        .into_response()
}

pub(crate) async fn detail_handler(
    State(service): State<Arc<SchemeMatchService>>,
    Path(scheme_id): Path<String>,
) -> Response {
    match service.scheme_detail(&SchemeId(scheme_id)) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rank_handler(
    State(service): State<Arc<SchemeMatchService>>,
    payload: Result<axum::Json<ProfileSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.rank(submission) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<SchemeMatchService>>,
    Path(scheme_id): Path<String>,
    payload: Result<axum::Json<ProfileSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.evaluate_scheme(&SchemeId(scheme_id), submission) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchServiceError) -> Response {
    let status = match &err {
        MatchServiceError::Profile(_) | MatchServiceError::Schema(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        MatchServiceError::UnknownScheme(_) => StatusCode::NOT_FOUND,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

/// Malformed or mistyped profile bodies keep axum's status but use the
/// same JSON error shape as the service errors.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}
