//! Users domain - profile lookups and moderation email eligibility

pub mod gate;
pub mod models;

pub use gate::{everyone, gate_for, is_beta_tester, EligibilityGate, BETA_TESTER_ROLE};
pub use models::{AuthIdentity, UserProfile};
