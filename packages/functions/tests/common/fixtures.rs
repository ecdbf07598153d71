//! Test fixtures for creating moderation test data.

use functions_core::domains::moderation::{
    CollectionKind, DocumentChange, ModeratedDocument, ModerationStatus,
};
use functions_core::domains::users::UserProfile;
use functions_core::kernel::{MockUserDirectory, TestDependencies};

pub const TEST_EMAIL: &str = "test@test.com";

/// Profile whose auth id equals its user id
pub fn user_factory(id: &str, display_name: &str, roles: &[&str]) -> UserProfile {
    UserProfile::builder()
        .id(id)
        .auth_id(id)
        .display_name(display_name)
        .user_name(id)
        .roles(roles.iter().map(|r| r.to_string()).collect::<Vec<_>>())
        .build()
}

/// user_1 is a beta tester, user_2 is not; every identity resolves to TEST_EMAIL
pub fn seeded_dependencies() -> TestDependencies {
    TestDependencies::new().mock_users(
        MockUserDirectory::new()
            .with_user(user_factory("user_1", "User 1", &["beta-tester"]))
            .with_user(user_factory("user_2", "User 2", &[]))
            .with_default_auth_email(TEST_EMAIL),
    )
}

/// How-to authored by `uid` in the given status
pub fn mock_how_to(uid: &str, moderation: ModerationStatus) -> ModeratedDocument {
    let mut doc = ModeratedDocument::new(format!("00_{}_howto", uid), moderation);
    doc.created_by = Some(uid.to_string());
    doc.title = Some("Mock Howto".to_string());
    doc.slug = Some("mock-howto".to_string());
    doc.rest.insert(
        "description".to_string(),
        serde_json::json!("A how-to used in tests"),
    );
    doc
}

pub fn mock_map_pin(uid: &str, moderation: ModerationStatus) -> ModeratedDocument {
    ModeratedDocument::new(uid, moderation)
}

pub fn how_to_change(before: ModeratedDocument, after: ModeratedDocument) -> DocumentChange {
    DocumentChange::new(before, after, CollectionKind::HowTo)
}

pub fn map_pin_change(before: ModeratedDocument, after: ModeratedDocument) -> DocumentChange {
    DocumentChange::new(before, after, CollectionKind::MapPin)
}
