use super::domain::{RuleField, Scheme};

const BASE_DOCUMENTS: [&str; 4] = [
    "Aadhaar Card",
    "Income Certificate",
    "Age Proof / Birth Certificate",
    "Bank Account Details",
];

/// Checklist an applicant should prepare before registering for a scheme.
pub fn required_documents(scheme: &Scheme) -> Vec<String> {
    let mut documents: Vec<String> = BASE_DOCUMENTS.iter().map(|doc| doc.to_string()).collect();

    if scheme.category.eq_ignore_ascii_case("education") {
        documents.push("Previous Marksheet".to_string());
    }

    if let Some(states) = scheme.restricted_states() {
        documents.push(format!("Domicile Certificate ({})", states.join(" / ")));
    }

    if restricts(scheme, RuleField::CasteCategory) {
        documents.push("Caste Certificate".to_string());
    }

    if restricts(scheme, RuleField::Disability) {
        documents.push("Disability Certificate (UDID)".to_string());
    }

    documents
}

fn restricts(scheme: &Scheme, field: RuleField) -> bool {
    scheme
        .rule(field)
        .map(|rule| rule.constraint.is_discriminating())
        .unwrap_or(false)
}
