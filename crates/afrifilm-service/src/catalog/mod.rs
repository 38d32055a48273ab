//! The content catalog: browsing, details with gated media, and publishing.

pub mod service;
pub mod visibility;

pub use service::{CatalogService, ContentSummary, PublishRequest};
