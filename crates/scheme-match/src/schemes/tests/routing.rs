use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::schemes::router::{detail_handler, evaluate_handler};
use crate::schemes::{scheme_router, SchemaErrorPolicy, SchemeMatchService};

#[tokio::test]
async fn detail_handler_returns_not_found_for_unknown_scheme() {
    let response = detail_handler(
        State(service(SchemaErrorPolicy::Omit)),
        Path("no-such-scheme".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("no-such-scheme")));
}

#[tokio::test]
async fn evaluate_handler_returns_unprocessable_for_invalid_profile() {
    let mut submission = submission();
    submission.household_members = 0;

    let response = evaluate_handler(
        State(service(SchemaErrorPolicy::Omit)),
        Path("pm-kisan".to_string()),
        Ok(axum::Json(submission)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn eligibility_route_ranks_schemes() {
    let router = scheme_router(service(SchemaErrorPolicy::Omit));

    let response = router
        .oneshot(
            Request::post("/api/v1/eligibility")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&submission()).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["evaluated"], json!(9));
    assert_eq!(payload["eligible_count"], json!(3));
    assert_eq!(payload["matches"][0]["scheme_id"], json!("pm-kisan"));
    assert_eq!(payload["matches"][0]["rule_matches"]["occupation"], json!(true));
    assert!(payload.get("rejected").is_none());
}

#[tokio::test]
async fn eligibility_route_returns_unprocessable_under_strict_policy() {
    let service = std::sync::Arc::new(SchemeMatchService::new(
        catalog_with_malformed_rule(),
        crate::schemes::EligibilityConfig {
            schema_error_policy: SchemaErrorPolicy::Strict,
        },
    ));
    let router = scheme_router(service);

    let response = router
        .oneshot(
            Request::post("/api/v1/eligibility")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&submission()).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("numeric-gender")));
}

#[tokio::test]
async fn list_route_applies_query_filters() {
    let router = scheme_router(service(SchemaErrorPolicy::Omit));

    let response = router
        .oneshot(
            Request::get("/api/v1/schemes?category=education")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], json!(2));
    assert_eq!(
        payload["schemes"][0]["id"],
        json!("post-matric-scholarship-sc-st")
    );
}

#[tokio::test]
async fn scheme_eligibility_route_scores_one_scheme() {
    let router = scheme_router(service(SchemaErrorPolicy::Omit));

    let response = router
        .oneshot(
            Request::post("/api/v1/schemes/kalia/eligibility")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&submission()).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eligible"], json!(false));
    assert_eq!(payload["score"], json!(0.8));
    assert_eq!(payload["rule_matches"]["state"], json!(false));
    assert_eq!(payload["scheme"]["scheme_type_label"], json!("State"));
}

#[tokio::test]
async fn eligibility_route_reports_malformed_body_as_json() {
    let router = scheme_router(service(SchemaErrorPolicy::Omit));
    let body = json!({
        "age": 30,
        "annual_income": 50000,
        "gender": "robot",
        "occupation": "farmer",
        "state": "Bihar",
        "disability_status": "none",
        "household_members": 4
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/eligibility")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("gender")));
}

#[tokio::test]
async fn scheme_eligibility_route_reports_missing_content_type_as_json() {
    let router = scheme_router(service(SchemaErrorPolicy::Omit));

    let response = router
        .oneshot(
            Request::post("/api/v1/schemes/kalia/eligibility")
                .body(Body::from(serde_json::to_vec(&submission()).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}
