use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::schemes::{
    load_catalog, Catalog, CasteCategory, DisabilityStatus, EligibilityConfig, Gender,
    Occupation, Profile, ProfileSubmission, SchemaErrorPolicy, Scheme, SchemeMatchService,
    SchemeRecord,
};

pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        age: 30,
        annual_income: 50_000,
        gender: Gender::Female,
        occupation: Occupation::Farmer,
        caste_category: None,
        state: "Bihar".to_string(),
        disability_status: DisabilityStatus::None,
        household_members: 4,
    }
}

pub(super) fn profile() -> Profile {
    Profile::try_from(submission()).expect("valid profile")
}

pub(super) fn profile_with(edit: impl FnOnce(&mut ProfileSubmission)) -> Profile {
    let mut submission = submission();
    edit(&mut submission);
    Profile::try_from(submission).expect("valid profile")
}

pub(super) fn scheduled_caste_student() -> ProfileSubmission {
    ProfileSubmission {
        age: 20,
        annual_income: 120_000,
        gender: Gender::Male,
        occupation: Occupation::Student,
        caste_category: Some(CasteCategory::Sc),
        state: "bihar".to_string(),
        disability_status: DisabilityStatus::None,
        household_members: 5,
    }
}

/// Record with every required rule set to the wildcard, overridden by `overrides`.
pub(super) fn record(id: &str, overrides: Value) -> SchemeRecord {
    let mut raw = json!({
        "id": id,
        "title": format!("Scheme {id}"),
        "type": "central",
        "category": "Welfare",
        "age_range": "any",
        "income_range": "any",
        "gender": "any",
        "caste_category": "any",
        "state": "any"
    });
    if let (Some(base), Value::Object(extra)) = (raw.as_object_mut(), overrides) {
        base.extend(extra);
    }
    serde_json::from_value(raw).expect("record deserialises")
}

pub(super) fn scheme(id: &str, overrides: Value) -> Scheme {
    record(id, overrides)
        .into_scheme(0)
        .expect("record is structurally valid")
}

pub(super) fn catalog(records: Vec<SchemeRecord>) -> Catalog {
    load_catalog(records).expect("catalog loads")
}

pub(super) fn standard_catalog() -> Catalog {
    Catalog::standard().expect("built-in catalog is valid")
}

pub(super) fn service(policy: SchemaErrorPolicy) -> Arc<SchemeMatchService> {
    Arc::new(SchemeMatchService::new(
        standard_catalog(),
        EligibilityConfig {
            schema_error_policy: policy,
        },
    ))
}

/// Catalog whose middle record declares a numeric gender, which only the
/// engine can reject.
pub(super) fn catalog_with_malformed_rule() -> Catalog {
    catalog(vec![
        record("open", json!({})),
        record("numeric-gender", json!({ "gender": 1 })),
        record("working-age", json!({ "age_range": { "min": 18, "max": 60 } })),
    ])
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
