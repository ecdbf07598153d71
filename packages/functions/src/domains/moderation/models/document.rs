use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a user-submitted content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModerationStatus {
    Draft,
    AwaitingModeration,
    Accepted,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::AwaitingModeration => "awaiting-moderation",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection a moderated document was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    #[serde(rename = "howtos")]
    HowTo,
    #[serde(rename = "mappins")]
    MapPin,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HowTo => "howtos",
            Self::MapPin => "mappins",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "howtos" => Ok(Self::HowTo),
            "mappins" => Ok(Self::MapPin),
            other => Err(format!("unknown collection: {}", other)),
        }
    }
}

/// Snapshot of a how-to or map pin as stored by the content collections.
///
/// Only the fields the email pipeline reads are typed; everything else is
/// kept in `rest` so the snapshot round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratedDocument {
    #[serde(rename = "_id")]
    pub id: String,

    /// Author of a how-to (`_createdBy`); absent on map pins
    #[serde(rename = "_createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    pub moderation: ModerationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ModeratedDocument {
    pub fn new(id: impl Into<String>, moderation: ModerationStatus) -> Self {
        Self {
            id: id.into(),
            created_by: None,
            moderation,
            title: None,
            slug: None,
            rest: Map::new(),
        }
    }

    /// Same document with a different moderation status
    pub fn with_moderation(&self, moderation: ModerationStatus) -> Self {
        Self {
            moderation,
            ..self.clone()
        }
    }
}

/// One observed write to a moderated collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange {
    pub before: ModeratedDocument,
    pub after: ModeratedDocument,
    pub collection_kind: CollectionKind,
    pub document_id: String,
    /// Delivery id assigned by the change-capture source, when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl DocumentChange {
    pub fn new(
        before: ModeratedDocument,
        after: ModeratedDocument,
        collection_kind: CollectionKind,
    ) -> Self {
        let document_id = after.id.clone();
        Self {
            before,
            after,
            collection_kind,
            document_id,
            event_id: None,
        }
    }

    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }
}
