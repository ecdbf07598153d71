//! Email domain - outbound email records and moderation templates

pub mod models;
pub mod templates;

pub use models::{EmailMessage, EmailRecord};
pub use templates::SiteConfig;
