// TestDependencies - in-memory implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseEmailStore, BaseUserDirectory, ServerDeps};
use crate::domains::email::{EmailRecord, SiteConfig};
use crate::domains::users::{is_beta_tester, EligibilityGate, UserProfile};

pub const TEST_SITE_URL: &str = "https://community.preciousplastic.com";

// =============================================================================
// Mock User Directory
// =============================================================================

#[derive(Default)]
pub struct MockUserDirectory {
    users: Mutex<HashMap<String, UserProfile>>,
    auth_emails: Mutex<HashMap<String, String>>,
    default_auth_email: Option<String>,
    fail_lookups: bool,
    user_lookups: Mutex<Vec<String>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: UserProfile) -> Self {
        self.users.lock().unwrap().insert(user.id.clone(), user);
        self
    }

    pub fn with_auth_email(self, auth_id: &str, email: &str) -> Self {
        self.auth_emails
            .lock()
            .unwrap()
            .insert(auth_id.to_string(), email.to_string());
        self
    }

    /// Resolve every auth id to this address (like a stubbed identity provider)
    pub fn with_default_auth_email(mut self, email: &str) -> Self {
        self.default_auth_email = Some(email.to_string());
        self
    }

    /// Make every lookup return an error
    pub fn failing(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// User ids that were looked up, in order
    pub fn user_lookups(&self) -> Vec<String> {
        self.user_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseUserDirectory for MockUserDirectory {
    async fn lookup_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.user_lookups.lock().unwrap().push(user_id.to_string());

        if self.fail_lookups {
            anyhow::bail!("user directory unavailable");
        }
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }

    async fn lookup_auth_email(&self, auth_id: &str) -> Result<Option<String>> {
        if self.fail_lookups {
            anyhow::bail!("identity provider unavailable");
        }
        let explicit = self.auth_emails.lock().unwrap().get(auth_id).cloned();
        Ok(explicit.or_else(|| self.default_auth_email.clone()))
    }
}

// =============================================================================
// Spy Email Store
// =============================================================================

#[derive(Default)]
pub struct SpyEmailStore {
    records: Mutex<Vec<EmailRecord>>,
    fail_writes: bool,
}

impl SpyEmailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert return an error
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub fn records(&self) -> Vec<EmailRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseEmailStore for SpyEmailStore {
    async fn insert(&self, record: &EmailRecord) -> Result<bool> {
        if self.fail_writes {
            anyhow::bail!("email store rejected write");
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.dedupe_key == record.dedupe_key) {
            return Ok(false);
        }
        records.push(record.clone());
        Ok(true)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for ServerDeps wired to in-memory services
pub struct TestDependencies {
    pub user_directory: Arc<MockUserDirectory>,
    pub email_store: Arc<SpyEmailStore>,
    pub site: SiteConfig,
    pub eligibility: EligibilityGate,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            user_directory: Arc::new(MockUserDirectory::new()),
            email_store: Arc::new(SpyEmailStore::new()),
            site: SiteConfig::new(TEST_SITE_URL),
            eligibility: is_beta_tester,
        }
    }

    pub fn mock_users(mut self, directory: MockUserDirectory) -> Self {
        self.user_directory = Arc::new(directory);
        self
    }

    pub fn mock_email_store(mut self, store: SpyEmailStore) -> Self {
        self.email_store = Arc::new(store);
        self
    }

    pub fn with_eligibility(mut self, gate: EligibilityGate) -> Self {
        self.eligibility = gate;
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.user_directory.clone(),
            self.email_store.clone(),
            self.site.clone(),
            self.eligibility,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
