//! Moderation email templates.
//!
//! Rendering is a pure function of its inputs so emails can be checked by
//! substring against known values.

use crate::domains::email::models::EmailMessage;

pub const HOW_TO_APPROVAL_SUBJECT: &str = "Your How-To has been approved!";
pub const HOW_TO_SUBMISSION_SUBJECT: &str = "Your How-To has been submitted";
pub const MAP_PIN_APPROVAL_SUBJECT: &str = "Your map pin has been approved!";
pub const MAP_PIN_SUBMISSION_SUBJECT: &str = "Your map pin has been submitted";

/// Appended to every moderation email
pub const SIGN_OFF: &str = "<p>Keep up the great work,<br />\
The Precious Plastic Team</p>\
<p style=\"font-size: 12px; color: #666;\">\
You are receiving this email because you shared content on the Precious Plastic community platform.</p>";

/// Site address used to build absolute links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site_base_url: String,
}

impl SiteConfig {
    pub fn new(site_base_url: impl Into<String>) -> Self {
        Self {
            site_base_url: site_base_url.into(),
        }
    }

    /// Join a site-relative path onto the base URL
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn how_to_url(&self, how_to_id: &str) -> String {
        self.absolute_url(&format!("how-to/{}", how_to_id))
    }

    pub fn map_pin_url(&self, pin_id: &str) -> String {
        self.absolute_url(&format!("map#{}", pin_id))
    }
}

fn greeting(display_name: &str) -> String {
    format!("<p>Hey {}</p>", display_name)
}

fn link(url: &str) -> String {
    format!("<p><a href=\"{url}\">{url}</a></p>", url = url)
}

fn compose(parts: &[String]) -> String {
    let mut html = String::from("<div>");
    for part in parts {
        html.push_str(part);
    }
    html.push_str(SIGN_OFF);
    html.push_str("</div>");
    html
}

pub fn how_to_approval(display_name: &str, title: &str, url: &str) -> EmailMessage {
    EmailMessage {
        subject: HOW_TO_APPROVAL_SUBJECT.to_string(),
        html: compose(&[
            greeting(display_name),
            format!("<p>Huzzah! Your How-To {} has been approved.</p>", title),
            "<p>It is now live for the whole community to see:</p>".to_string(),
            link(url),
        ]),
    }
}

pub fn how_to_submission(display_name: &str, title: &str) -> EmailMessage {
    EmailMessage {
        subject: HOW_TO_SUBMISSION_SUBJECT.to_string(),
        html: compose(&[
            greeting(display_name),
            format!("<p>Huzzah! Your How-To {} has been submitted.</p>", title),
            "<p>Our moderators will review it soon. We will let you know once it is approved.</p>"
                .to_string(),
        ]),
    }
}

pub fn map_pin_approval(display_name: &str, url: &str) -> EmailMessage {
    EmailMessage {
        subject: MAP_PIN_APPROVAL_SUBJECT.to_string(),
        html: compose(&[
            greeting(display_name),
            "<p>Your map pin has been approved.</p>".to_string(),
            "<p>Others can now find you on the map:</p>".to_string(),
            link(url),
        ]),
    }
}

pub fn map_pin_submission(display_name: &str) -> EmailMessage {
    EmailMessage {
        subject: MAP_PIN_SUBMISSION_SUBJECT.to_string(),
        html: compose(&[
            greeting(display_name),
            "<p>Your map pin has been submitted.</p>".to_string(),
            "<p>Our moderators will review it soon. We will let you know once it is approved.</p>"
                .to_string(),
        ]),
    }
}
