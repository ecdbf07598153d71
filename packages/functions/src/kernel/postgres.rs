//! Postgres-backed implementations of the kernel traits.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::domains::email::EmailRecord;
use crate::domains::users::{AuthIdentity, UserProfile};
use crate::kernel::{BaseEmailStore, BaseUserDirectory};

/// Reads profiles from `users` and addresses from `auth_identities`
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserDirectory for PostgresUserDirectory {
    #[instrument(skip(self))]
    async fn lookup_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        UserProfile::find_by_id(user_id, &self.pool)
            .await
            .with_context(|| format!("Failed to load user {}", user_id))
    }

    #[instrument(skip(self))]
    async fn lookup_auth_email(&self, auth_id: &str) -> Result<Option<String>> {
        AuthIdentity::find_email(auth_id, &self.pool)
            .await
            .with_context(|| format!("Failed to resolve email for auth id {}", auth_id))
    }
}

/// Writes email records to the `emails` table
pub struct PostgresEmailStore {
    pool: PgPool,
}

impl PostgresEmailStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseEmailStore for PostgresEmailStore {
    #[instrument(skip(self, record), fields(email_id = %record.id, dedupe_key = %record.dedupe_key))]
    async fn insert(&self, record: &EmailRecord) -> Result<bool> {
        record
            .insert(&self.pool)
            .await
            .context("Failed to insert email record")
    }
}
