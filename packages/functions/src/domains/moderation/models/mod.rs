pub mod document;

pub use document::{CollectionKind, DocumentChange, ModeratedDocument, ModerationStatus};
