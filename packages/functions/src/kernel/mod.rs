//! Kernel module - infrastructure traits, adapters and dependencies.

pub mod deps;
pub mod postgres;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use postgres::{PostgresEmailStore, PostgresUserDirectory};
pub use test_dependencies::{MockUserDirectory, SpyEmailStore, TestDependencies};
pub use traits::*;
