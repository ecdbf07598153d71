use tracing::debug;

use crate::domains::moderation::models::{DocumentChange, ModerationStatus};

/// What a single moderation write means for the content owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Moved into `accepted` from any other status
    Approved,
    /// Moved into `awaiting-moderation` from any other status (first submission or resubmission)
    Submitted,
    NoOp,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Classify a before/after status pair - pure decision logic.
///
/// Only the destination status and whether it differs from the origin are
/// considered, so a rewrite of an already-accepted document never approves
/// twice.
pub fn classify(before: ModerationStatus, after: ModerationStatus) -> Transition {
    if before == after {
        return Transition::NoOp;
    }

    match after {
        ModerationStatus::Accepted => Transition::Approved,
        ModerationStatus::AwaitingModeration => Transition::Submitted,
        ModerationStatus::Draft | ModerationStatus::Rejected => Transition::NoOp,
    }
}

pub fn classify_change(change: &DocumentChange) -> Transition {
    let transition = classify(change.before.moderation, change.after.moderation);
    debug!(
        document_id = %change.document_id,
        collection = %change.collection_kind,
        before = %change.before.moderation,
        after = %change.after.moderation,
        transition = ?transition,
        "Classified moderation change"
    );
    transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModerationStatus::*;

    const ALL: [ModerationStatus; 4] = [Draft, AwaitingModeration, Accepted, Rejected];

    #[test]
    fn test_unchanged_status_is_noop() {
        for status in ALL {
            assert_eq!(classify(status, status), Transition::NoOp, "{status} -> {status}");
        }
    }

    #[test]
    fn test_into_accepted_is_approval() {
        for before in [Draft, AwaitingModeration, Rejected] {
            assert_eq!(classify(before, Accepted), Transition::Approved);
        }
    }

    #[test]
    fn test_into_awaiting_is_submission_from_any_origin() {
        for before in [Draft, Accepted, Rejected] {
            assert_eq!(classify(before, AwaitingModeration), Transition::Submitted);
        }
    }

    #[test]
    fn test_withdrawal_and_rejection_are_noop() {
        assert_eq!(classify(Accepted, Draft), Transition::NoOp);
        assert_eq!(classify(AwaitingModeration, Rejected), Transition::NoOp);
        assert_eq!(classify(Accepted, Rejected), Transition::NoOp);
        assert!(classify(Draft, Rejected).is_noop());
    }
}
