//! Admin moderation: approval flips, creator verification and deletion.

pub mod service;

pub use service::ModerationService;
