//! # afrifilm-service
//!
//! Business logic service layer for AfriFilm. Each service orchestrates
//! the stores, the access-rights cache and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod catalog;
pub mod entitlement;
pub mod moderation;
pub mod payment;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountService, LoginResult, RegisterRequest};
pub use catalog::{CatalogService, ContentSummary, PublishRequest};
pub use entitlement::{AccessCache, AccessDecision, EntitlementEngine, PurchaseReceipt};
pub use moderation::ModerationService;
pub use payment::{PaymentDetails, PaymentSimulator};
