//! Moderation domain - decides which moderation changes notify content owners
//!
//! Flow:
//!   change-capture trigger → handle_moderation_update → builder (classify,
//!   gate, render) → email store

pub mod effects;
pub mod errors;
pub mod machines;
pub mod models;

// Re-export commonly used types
pub use effects::{
    builder_for, handle_moderation_update, handle_moderation_update_with, DispatchOutcome,
    HowToEmailBuilder, MapPinEmailBuilder, ModerationEmailBuilder, SkipReason,
};
pub use errors::ModerationEmailError;
pub use machines::{classify, Transition};
pub use models::{CollectionKind, DocumentChange, ModeratedDocument, ModerationStatus};
