use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::domains::moderation::{handle_moderation_update, DispatchOutcome, DocumentChange, SkipReason};
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerStatus {
    Queued,
    Skipped,
    Error,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    status: TriggerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Moderation change trigger
///
/// Receives one before/after pair from the change-capture source. Returns
/// 200 whether or not an email was queued; 500 only when the email store
/// failed, so the source redelivers the change.
pub async fn moderation_trigger_handler(
    Extension(state): Extension<AppState>,
    Json(change): Json<DocumentChange>,
) -> (StatusCode, Json<TriggerResponse>) {
    match handle_moderation_update(&change, &state.deps).await {
        Ok(DispatchOutcome::Queued(record)) => (
            StatusCode::OK,
            Json(TriggerResponse {
                status: TriggerStatus::Queued,
                email_id: Some(record.id),
                reason: None,
                error: None,
            }),
        ),
        Ok(DispatchOutcome::Skipped(reason)) => (
            StatusCode::OK,
            Json(TriggerResponse {
                status: TriggerStatus::Skipped,
                email_id: None,
                reason: Some(reason),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TriggerResponse {
                status: TriggerStatus::Error,
                email_id: None,
                reason: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}
