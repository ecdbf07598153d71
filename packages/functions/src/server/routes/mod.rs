// HTTP routes
pub mod health;
pub mod triggers;

pub use health::*;
pub use triggers::*;
