use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Subject and body of an outbound email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

/// Outbound email waiting for the external mailer
///
/// Written once by the moderation pipeline and never updated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    pub id: Uuid,
    pub to: String,
    pub message: EmailMessage,
    /// Fingerprint of the change that produced this email
    pub dedupe_key: String,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct EmailRow {
    id: Uuid,
    recipient: String,
    subject: String,
    html: String,
    dedupe_key: String,
    created_at: DateTime<Utc>,
}

impl From<EmailRow> for EmailRecord {
    fn from(row: EmailRow) -> Self {
        Self {
            id: row.id,
            to: row.recipient,
            message: EmailMessage {
                subject: row.subject,
                html: row.html,
            },
            dedupe_key: row.dedupe_key,
            created_at: row.created_at,
        }
    }
}

impl EmailRecord {
    pub fn new(to: impl Into<String>, message: EmailMessage, dedupe_key: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            to: to.into(),
            message,
            dedupe_key: dedupe_key.into(),
            created_at: Utc::now(),
        }
    }

    /// Record an email (ignores duplicates)
    ///
    /// Uses ON CONFLICT DO NOTHING on the dedupe key so a redelivered change
    /// never queues a second email. Returns whether a row was written.
    pub async fn insert(&self, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO emails (id, recipient, subject, html, dedupe_key, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (dedupe_key) DO NOTHING",
        )
        .bind(self.id)
        .bind(&self.to)
        .bind(&self.message.subject)
        .bind(&self.message.html)
        .bind(&self.dedupe_key)
        .bind(self.created_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Find all emails queued for a recipient
    pub async fn find_by_recipient(to: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, EmailRow>(
            "SELECT * FROM emails WHERE recipient = $1 ORDER BY created_at DESC",
        )
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_dedupe_key(dedupe_key: &str, pool: &PgPool) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, EmailRow>("SELECT * FROM emails WHERE dedupe_key = $1")
            .bind(dedupe_key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }
}
