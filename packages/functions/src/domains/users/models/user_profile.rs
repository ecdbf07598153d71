use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use typed_builder::TypedBuilder;

/// Public profile of a platform user - read-only from the email pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub auth_id: String,
    pub display_name: String,
    pub user_name: String,
    #[builder(default)]
    #[sqlx(rename = "user_roles")]
    pub roles: Vec<String>,
    #[builder(default, setter(strip_option))]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Find profile by user id
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, auth_id, display_name, user_name, user_roles, email
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert or replace a profile
    pub async fn upsert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, auth_id, display_name, user_name, user_roles, email)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                auth_id = EXCLUDED.auth_id,
                display_name = EXCLUDED.display_name,
                user_name = EXCLUDED.user_name,
                user_roles = EXCLUDED.user_roles,
                email = EXCLUDED.email",
        )
        .bind(&self.id)
        .bind(&self.auth_id)
        .bind(&self.display_name)
        .bind(&self.user_name)
        .bind(&self.roles)
        .bind(&self.email)
        .execute(pool)
        .await?;

        Ok(())
    }
}

/// Login identity backing a profile; the address emails are sent to
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AuthIdentity {
    pub auth_id: String,
    pub email: String,
}

impl AuthIdentity {
    /// Resolve the email address registered for an auth id
    pub async fn find_email(auth_id: &str, pool: &PgPool) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT email FROM auth_identities WHERE auth_id = $1")
            .bind(auth_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn upsert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "INSERT INTO auth_identities (auth_id, email) VALUES ($1, $2)
             ON CONFLICT (auth_id) DO UPDATE SET email = EXCLUDED.email",
        )
        .bind(&self.auth_id)
        .bind(&self.email)
        .execute(pool)
        .await?;

        Ok(())
    }
}
