//! Moderation email rollout gate.
//!
//! Emails are currently limited to beta testers. Lifting the gate means
//! injecting [`everyone`] instead of [`is_beta_tester`]; nothing else in the
//! pipeline refers to roles.

use crate::domains::users::models::UserProfile;

pub const BETA_TESTER_ROLE: &str = "beta-tester";

/// Predicate deciding whether a user receives moderation emails
pub type EligibilityGate = fn(&UserProfile) -> bool;

pub fn is_beta_tester(user: &UserProfile) -> bool {
    user.has_role(BETA_TESTER_ROLE)
}

pub fn everyone(_user: &UserProfile) -> bool {
    true
}

/// Gate selected by the `MODERATION_EMAILS_BETA_ONLY` setting
pub fn gate_for(beta_only: bool) -> EligibilityGate {
    if beta_only {
        is_beta_tester
    } else {
        everyone
    }
}
