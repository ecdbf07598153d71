// Common utilities shared across domains

pub mod utils;

pub use utils::change_fingerprint;
