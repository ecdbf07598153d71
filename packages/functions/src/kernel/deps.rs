//! Server dependencies for the moderation pipeline (using traits for testability)
//!
//! Everything the pipeline reads from the outside world is passed in here;
//! nothing is taken from process state.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::email::SiteConfig;
use crate::domains::users::EligibilityGate;
use crate::kernel::postgres::{PostgresEmailStore, PostgresUserDirectory};
use crate::kernel::{BaseEmailStore, BaseUserDirectory};

/// Dependencies accessible to the moderation handler
#[derive(Clone)]
pub struct ServerDeps {
    pub user_directory: Arc<dyn BaseUserDirectory>,
    pub email_store: Arc<dyn BaseEmailStore>,
    pub site: SiteConfig,
    /// Who may receive moderation emails (beta rollout)
    pub eligibility: EligibilityGate,
}

impl ServerDeps {
    pub fn new(
        user_directory: Arc<dyn BaseUserDirectory>,
        email_store: Arc<dyn BaseEmailStore>,
        site: SiteConfig,
        eligibility: EligibilityGate,
    ) -> Self {
        Self {
            user_directory,
            email_store,
            site,
            eligibility,
        }
    }

    /// Production wiring backed by Postgres
    pub fn postgres(pool: PgPool, site: SiteConfig, eligibility: EligibilityGate) -> Self {
        Self::new(
            Arc::new(PostgresUserDirectory::new(pool.clone())),
            Arc::new(PostgresEmailStore::new(pool)),
            site,
            eligibility,
        )
    }
}
