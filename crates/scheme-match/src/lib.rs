//! Eligibility matching and scoring for government welfare schemes.
//!
//! A [`schemes::Catalog`] holds validated scheme records; the
//! [`schemes::EligibilityEngine`] evaluates an applicant [`schemes::Profile`]
//! against every scheme and returns a deterministic, explainable ranking.

pub mod config;
pub mod error;
pub mod schemes;
pub mod telemetry;
