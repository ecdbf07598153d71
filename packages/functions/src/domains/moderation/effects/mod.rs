//! Moderation effects - turn a document change into at most one queued email
//!
//! Pipeline:
//! 1. Classify the transition (pure)
//! 2. Validate the fields the templates need
//! 3. Look up the owner and run the eligibility gate
//! 4. Resolve the recipient address
//! 5. Render + write one record to the email store
//!
//! Only a store failure is returned as an error. Everything else drops the
//! email for this change so a broken notification never blocks moderation.

pub mod builders;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::common::change_fingerprint;
use crate::domains::email::EmailRecord;
use crate::domains::moderation::errors::ModerationEmailError;
use crate::domains::moderation::machines::Transition;
use crate::domains::moderation::models::DocumentChange;
use crate::domains::users::UserProfile;
use crate::kernel::ServerDeps;

pub use builders::{builder_for, HowToEmailBuilder, MapPinEmailBuilder, ModerationEmailBuilder};

/// Why no email was queued for a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoQualifyingTransition,
    NotEligible,
    UserNotFound,
    RecipientNotFound,
    InvalidDocument,
    LookupFailed,
    /// Store already holds an email for this exact change
    Duplicate,
}

impl SkipReason {
    /// Skip reason for a suppressible error, `None` for errors that must propagate
    fn from_error(err: &ModerationEmailError) -> Option<Self> {
        match err {
            ModerationEmailError::UserNotFound { .. } => Some(Self::UserNotFound),
            ModerationEmailError::RecipientNotFound { .. } => Some(Self::RecipientNotFound),
            ModerationEmailError::InvalidDocument { .. } => Some(Self::InvalidDocument),
            ModerationEmailError::Lookup(_) => Some(Self::LookupFailed),
            ModerationEmailError::StoreWrite(_) => None,
        }
    }
}

/// What the builder decided, before anything is written
#[derive(Debug, Clone, PartialEq)]
pub enum EmailDecision {
    Send(EmailRecord),
    Skip(SkipReason),
}

/// Result of handling one change
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Queued(EmailRecord),
    Skipped(SkipReason),
}

impl DispatchOutcome {
    pub fn queued(&self) -> Option<&EmailRecord> {
        match self {
            Self::Queued(record) => Some(record),
            Self::Skipped(_) => None,
        }
    }
}

/// Handle a moderation change using the builder for its collection
pub async fn handle_moderation_update(
    change: &DocumentChange,
    deps: &ServerDeps,
) -> Result<DispatchOutcome, ModerationEmailError> {
    handle_moderation_update_with(builder_for(change.collection_kind), change, deps).await
}

/// Handle a moderation change with an explicit builder
#[instrument(skip(builder, change, deps), fields(document_id = %change.document_id, collection = %change.collection_kind))]
pub async fn handle_moderation_update_with(
    builder: &dyn ModerationEmailBuilder,
    change: &DocumentChange,
    deps: &ServerDeps,
) -> Result<DispatchOutcome, ModerationEmailError> {
    let decision = match build_moderation_email(builder, change, deps).await {
        Ok(decision) => decision,
        Err(e) => match SkipReason::from_error(&e) {
            Some(reason) => {
                warn!(error = %e, "Suppressing moderation email");
                EmailDecision::Skip(reason)
            }
            None => return Err(e),
        },
    };

    let record = match decision {
        EmailDecision::Send(record) => record,
        EmailDecision::Skip(reason) => {
            info!(reason = ?reason, "No moderation email queued");
            return Ok(DispatchOutcome::Skipped(reason));
        }
    };

    let inserted = deps.email_store.insert(&record).await.map_err(|e| {
        error!(error = %e, email_id = %record.id, "Failed to queue moderation email");
        ModerationEmailError::StoreWrite(e.into())
    })?;

    if !inserted {
        info!(dedupe_key = %record.dedupe_key, "Moderation email already queued for this change");
        return Ok(DispatchOutcome::Skipped(SkipReason::Duplicate));
    }

    info!(email_id = %record.id, subject = %record.message.subject, "Queued moderation email");
    Ok(DispatchOutcome::Queued(record))
}

/// Decide whether a change produces an email and build it. Performs lookups
/// but never writes.
pub async fn build_moderation_email(
    builder: &dyn ModerationEmailBuilder,
    change: &DocumentChange,
    deps: &ServerDeps,
) -> Result<EmailDecision, ModerationEmailError> {
    let transition = builder.classify(change);
    if transition == Transition::NoOp {
        return Ok(EmailDecision::Skip(SkipReason::NoQualifyingTransition));
    }

    let document = &change.after;
    builder.validate(document)?;
    let owner_id = builder.owner_id(document)?;

    let user = deps
        .user_directory
        .lookup_user(owner_id)
        .await
        .map_err(|e| ModerationEmailError::Lookup(e.into()))?
        .ok_or_else(|| ModerationEmailError::UserNotFound {
            user_id: owner_id.to_string(),
        })?;

    if !(deps.eligibility)(&user) {
        debug!(user_id = %user.id, "Owner not eligible for moderation emails");
        return Ok(EmailDecision::Skip(SkipReason::NotEligible));
    }

    let to = resolve_recipient(&user, deps).await?;

    let message = match builder.render(transition, document, &user, &deps.site)? {
        Some(message) => message,
        None => return Ok(EmailDecision::Skip(SkipReason::NoQualifyingTransition)),
    };

    Ok(EmailDecision::Send(EmailRecord::new(
        to,
        message,
        change_fingerprint(change),
    )))
}

/// Identity provider address first, profile address as fallback. Blank
/// addresses count as missing.
async fn resolve_recipient(
    user: &UserProfile,
    deps: &ServerDeps,
) -> Result<String, ModerationEmailError> {
    let from_auth = deps
        .user_directory
        .lookup_auth_email(&user.auth_id)
        .await
        .map_err(|e| ModerationEmailError::Lookup(e.into()))?;

    from_auth
        .filter(|email| !email.trim().is_empty())
        .or_else(|| user.email.clone().filter(|email| !email.trim().is_empty()))
        .ok_or_else(|| ModerationEmailError::RecipientNotFound {
            auth_id: user.auth_id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::email::templates::{HOW_TO_SUBMISSION_SUBJECT, MAP_PIN_APPROVAL_SUBJECT};
    use crate::domains::moderation::models::{CollectionKind, ModeratedDocument, ModerationStatus};
    use crate::kernel::{MockUserDirectory, SpyEmailStore, TestDependencies};

    fn beta_user() -> UserProfile {
        UserProfile::builder()
            .id("user_1")
            .auth_id("auth_1")
            .display_name("User 1")
            .user_name("user_1")
            .roles(vec!["beta-tester".to_string()])
            .build()
    }

    fn pin_change(before: ModerationStatus, after: ModerationStatus) -> DocumentChange {
        DocumentChange::new(
            ModeratedDocument::new("user_1", before),
            ModeratedDocument::new("user_1", after),
            CollectionKind::MapPin,
        )
    }

    #[tokio::test]
    async fn test_approval_is_queued() {
        let test_deps = TestDependencies::new().mock_users(
            MockUserDirectory::new()
                .with_user(beta_user())
                .with_auth_email("auth_1", "test@test.com"),
        );
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::AwaitingModeration, ModerationStatus::Accepted),
            &deps,
        )
        .await
        .unwrap();

        let record = outcome.queued().expect("email queued");
        assert_eq!(record.to, "test@test.com");
        assert_eq!(record.message.subject, MAP_PIN_APPROVAL_SUBJECT);
        assert_eq!(test_deps.email_store.count(), 1);
    }

    #[tokio::test]
    async fn test_noop_skips_lookup() {
        let test_deps =
            TestDependencies::new().mock_users(MockUserDirectory::new().with_user(beta_user()));
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::Accepted, ModerationStatus::Draft),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped(SkipReason::NoQualifyingTransition)
        );
        assert!(test_deps.user_directory.user_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_profile_email_is_fallback() {
        let user = UserProfile {
            email: Some("profile@test.com".to_string()),
            ..beta_user()
        };
        let test_deps = TestDependencies::new().mock_users(MockUserDirectory::new().with_user(user));
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::Accepted, ModerationStatus::AwaitingModeration),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(outcome.queued().unwrap().to, "profile@test.com");
    }

    #[tokio::test]
    async fn test_blank_auth_email_falls_back_to_profile() {
        let user = UserProfile {
            email: Some("profile@test.com".to_string()),
            ..beta_user()
        };
        let test_deps = TestDependencies::new().mock_users(
            MockUserDirectory::new()
                .with_user(user)
                .with_auth_email("auth_1", "  "),
        );
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::AwaitingModeration, ModerationStatus::Accepted),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(outcome.queued().unwrap().to, "profile@test.com");
        assert_eq!(test_deps.email_store.count(), 1);
    }

    #[tokio::test]
    async fn test_blank_addresses_everywhere_are_suppressed() {
        let user = UserProfile {
            email: Some(String::new()),
            ..beta_user()
        };
        let test_deps = TestDependencies::new().mock_users(
            MockUserDirectory::new()
                .with_user(user)
                .with_auth_email("auth_1", ""),
        );
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::AwaitingModeration, ModerationStatus::Accepted),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Skipped(SkipReason::RecipientNotFound));
    }

    #[test]
    fn test_skip_reasons_cover_only_suppressible_errors() {
        assert_eq!(
            SkipReason::from_error(&ModerationEmailError::Lookup("down".into())),
            Some(SkipReason::LookupFailed)
        );
        assert_eq!(
            SkipReason::from_error(&ModerationEmailError::UserNotFound {
                user_id: "user_1".into()
            }),
            Some(SkipReason::UserNotFound)
        );
        assert_eq!(
            SkipReason::from_error(&ModerationEmailError::StoreWrite("down".into())),
            None
        );
    }

    #[tokio::test]
    async fn test_missing_recipient_is_suppressed() {
        let test_deps =
            TestDependencies::new().mock_users(MockUserDirectory::new().with_user(beta_user()));
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update(
            &pin_change(ModerationStatus::Draft, ModerationStatus::AwaitingModeration),
            &deps,
        )
        .await
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Skipped(SkipReason::RecipientNotFound));
        assert_eq!(test_deps.email_store.count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let test_deps = TestDependencies::new()
            .mock_users(
                MockUserDirectory::new()
                    .with_user(beta_user())
                    .with_default_auth_email("test@test.com"),
            )
            .mock_email_store(SpyEmailStore::failing());
        let deps = test_deps.server_deps();

        let err = handle_moderation_update(
            &pin_change(ModerationStatus::Rejected, ModerationStatus::AwaitingModeration),
            &deps,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ModerationEmailError::StoreWrite(_)));
        assert!(!err.is_suppressible());
    }

    #[tokio::test]
    async fn test_explicit_builder_is_used() {
        let how_to = ModeratedDocument {
            created_by: Some("user_1".to_string()),
            title: Some("Mock Howto".to_string()),
            ..ModeratedDocument::new("00_user_1_howto", ModerationStatus::Rejected)
        };
        let change = DocumentChange::new(
            how_to.clone(),
            how_to.with_moderation(ModerationStatus::AwaitingModeration),
            CollectionKind::HowTo,
        );
        let test_deps = TestDependencies::new().mock_users(
            MockUserDirectory::new()
                .with_user(beta_user())
                .with_default_auth_email("test@test.com"),
        );
        let deps = test_deps.server_deps();

        let outcome = handle_moderation_update_with(&HowToEmailBuilder, &change, &deps)
            .await
            .unwrap();

        assert_eq!(
            outcome.queued().unwrap().message.subject,
            HOW_TO_SUBMISSION_SUBJECT
        );
    }
}
