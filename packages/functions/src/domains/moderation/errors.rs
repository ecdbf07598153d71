use thiserror::Error;

/// Errors raised while turning a moderation change into an email.
///
/// Everything except `StoreWrite` only suppresses the email for that change.
#[derive(Debug, Error)]
pub enum ModerationEmailError {
    /// Owner id has no profile
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// Neither the identity provider nor the profile has an address
    #[error("no email address for auth id: {auth_id}")]
    RecipientNotFound { auth_id: String },

    /// Document is missing a field the template needs
    #[error("invalid document {document_id}: {reason}")]
    InvalidDocument { document_id: String, reason: String },

    /// User directory unavailable or failed
    #[error("user directory error: {0}")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Email store rejected the write
    #[error("email store write failed: {0}")]
    StoreWrite(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ModerationEmailError {
    /// Whether the error should only drop this email rather than fail the event
    pub fn is_suppressible(&self) -> bool {
        !matches!(self, Self::StoreWrite(_))
    }

    pub(crate) fn invalid(document_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDocument {
            document_id: document_id.to_string(),
            reason: reason.into(),
        }
    }
}
