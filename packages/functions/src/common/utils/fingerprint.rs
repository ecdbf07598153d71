use sha2::{Digest, Sha256};

use crate::domains::moderation::models::DocumentChange;

/// Fingerprint a change for duplicate detection.
///
/// Uses the change-capture event id when the source provides one, otherwise
/// the canonical JSON of both snapshots. Redelivering the same change yields
/// the same key; a later genuine transition (different snapshot content)
/// yields a new one.
pub fn change_fingerprint(change: &DocumentChange) -> String {
    let mut hasher = Sha256::new();
    hasher.update(change.collection_kind.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(change.document_id.as_bytes());
    hasher.update([0u8]);

    match &change.event_id {
        Some(event_id) => {
            hasher.update(b"event:");
            hasher.update(event_id.as_bytes());
        }
        None => {
            hasher.update(b"snapshot:");
            // serde_json maps are ordered by key, so this is stable
            hasher.update(serde_json::to_vec(&change.before).unwrap_or_default());
            hasher.update([0u8]);
            hasher.update(serde_json::to_vec(&change.after).unwrap_or_default());
        }
    }

    format!("{:x}", hasher.finalize())
}
