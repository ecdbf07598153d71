//! Kind-specific email builders.
//!
//! Each moderated collection gets one builder. The handler picks it from the
//! change's collection tag; adding a content kind means adding a builder.

use crate::domains::email::{templates, EmailMessage, SiteConfig};
use crate::domains::moderation::errors::ModerationEmailError;
use crate::domains::moderation::machines::{classify_change, Transition};
use crate::domains::moderation::models::{CollectionKind, DocumentChange, ModeratedDocument};
use crate::domains::users::UserProfile;

pub trait ModerationEmailBuilder: Send + Sync {
    fn kind(&self) -> CollectionKind;

    fn classify(&self, change: &DocumentChange) -> Transition {
        classify_change(change)
    }

    /// User id of the document's owner
    fn owner_id<'a>(&self, document: &'a ModeratedDocument) -> Result<&'a str, ModerationEmailError>;

    /// Check the fields the templates need before any lookups happen
    fn validate(&self, document: &ModeratedDocument) -> Result<(), ModerationEmailError>;

    /// Render the email for a qualifying transition; `None` for `NoOp`
    fn render(
        &self,
        transition: Transition,
        document: &ModeratedDocument,
        user: &UserProfile,
        site: &SiteConfig,
    ) -> Result<Option<EmailMessage>, ModerationEmailError>;
}

pub struct HowToEmailBuilder;

impl HowToEmailBuilder {
    fn title<'a>(&self, document: &'a ModeratedDocument) -> Result<&'a str, ModerationEmailError> {
        document
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ModerationEmailError::invalid(&document.id, "missing title"))
    }
}

impl ModerationEmailBuilder for HowToEmailBuilder {
    fn kind(&self) -> CollectionKind {
        CollectionKind::HowTo
    }

    fn owner_id<'a>(&self, document: &'a ModeratedDocument) -> Result<&'a str, ModerationEmailError> {
        document
            .created_by
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ModerationEmailError::invalid(&document.id, "missing _createdBy"))
    }

    fn validate(&self, document: &ModeratedDocument) -> Result<(), ModerationEmailError> {
        self.title(document)?;
        self.owner_id(document)?;
        Ok(())
    }

    fn render(
        &self,
        transition: Transition,
        document: &ModeratedDocument,
        user: &UserProfile,
        site: &SiteConfig,
    ) -> Result<Option<EmailMessage>, ModerationEmailError> {
        let message = match transition {
            Transition::Approved => templates::how_to_approval(
                &user.display_name,
                self.title(document)?,
                &site.how_to_url(&document.id),
            ),
            Transition::Submitted => {
                templates::how_to_submission(&user.display_name, self.title(document)?)
            }
            Transition::NoOp => return Ok(None),
        };
        Ok(Some(message))
    }
}

/// Map pins are keyed by the id of the user who owns them
pub struct MapPinEmailBuilder;

impl ModerationEmailBuilder for MapPinEmailBuilder {
    fn kind(&self) -> CollectionKind {
        CollectionKind::MapPin
    }

    fn owner_id<'a>(&self, document: &'a ModeratedDocument) -> Result<&'a str, ModerationEmailError> {
        if document.id.is_empty() {
            return Err(ModerationEmailError::invalid(&document.id, "missing _id"));
        }
        Ok(document.id.as_str())
    }

    fn validate(&self, document: &ModeratedDocument) -> Result<(), ModerationEmailError> {
        self.owner_id(document).map(|_| ())
    }

    fn render(
        &self,
        transition: Transition,
        document: &ModeratedDocument,
        user: &UserProfile,
        site: &SiteConfig,
    ) -> Result<Option<EmailMessage>, ModerationEmailError> {
        let message = match transition {
            Transition::Approved => {
                templates::map_pin_approval(&user.display_name, &site.map_pin_url(&document.id))
            }
            Transition::Submitted => templates::map_pin_submission(&user.display_name),
            Transition::NoOp => return Ok(None),
        };
        Ok(Some(message))
    }
}

/// Builder for a collection
pub fn builder_for(kind: CollectionKind) -> &'static dyn ModerationEmailBuilder {
    match kind {
        CollectionKind::HowTo => &HowToEmailBuilder,
        CollectionKind::MapPin => &MapPinEmailBuilder,
    }
}
