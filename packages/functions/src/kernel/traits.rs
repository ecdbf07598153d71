// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Deciding whether to send an email lives in domains/moderation.
//
// Naming convention: Base* for trait names (e.g., BaseUserDirectory)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::email::EmailRecord;
use crate::domains::users::UserProfile;

// =============================================================================
// User Directory Trait (Infrastructure - profiles + identity)
// =============================================================================

#[async_trait]
pub trait BaseUserDirectory: Send + Sync {
    /// Look up a profile by user id
    async fn lookup_user(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Resolve the email address of a login identity
    async fn lookup_auth_email(&self, auth_id: &str) -> Result<Option<String>>;
}

// =============================================================================
// Email Store Trait (Infrastructure - outbound mail queue)
// =============================================================================

#[async_trait]
pub trait BaseEmailStore: Send + Sync {
    /// Queue an email for the external mailer.
    ///
    /// Returns `false` when a record with the same dedupe key already exists.
    async fn insert(&self, record: &EmailRecord) -> Result<bool>;
}
