// Business domains
pub mod email;
pub mod moderation;
pub mod users;
