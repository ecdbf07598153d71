pub mod fingerprint;

pub use fingerprint::change_fingerprint;
