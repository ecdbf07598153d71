use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL used for absolute links in rendered emails
    pub site_url: String,
    /// Restrict moderation emails to beta testers (temporary rollout gate)
    pub moderation_emails_beta_only: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            site_url: env::var("SITE_URL").context("SITE_URL must be set")?,
            moderation_emails_beta_only: parse_flag(
                env::var("MODERATION_EMAILS_BETA_ONLY").ok().as_deref(),
                true,
            )
            .context("MODERATION_EMAILS_BETA_ONLY must be true or false")?,
        })
    }
}

fn parse_flag(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => anyhow::bail!("invalid boolean flag: {}", other),
        },
    }
}
