//! # afrifilm-database
//!
//! PostgreSQL connection management, the store traits the services depend
//! on, their Postgres repositories, and an in-memory store for tests and
//! local demos.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ContentStore, PurchaseOutcome, TransactionLedger, UserStore};
