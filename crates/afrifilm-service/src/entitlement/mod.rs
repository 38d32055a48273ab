//! The entitlement engine: access decisions and the purchase state machine.

pub mod cache;
pub mod decision;
pub mod engine;
pub mod purchase;

pub use cache::AccessCache;
pub use decision::AccessDecision;
pub use engine::EntitlementEngine;
pub use purchase::PurchaseReceipt;
