// Community Platform Functions - Moderation Email Core
//
// Observes moderation state changes on how-tos and map pins and decides
// whether to enqueue a notification email for the content owner.
//
// Domains are organized under domains/*; infrastructure traits and
// adapters live in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
