//! Purchase transaction entities.

pub mod model;
pub mod status;

pub use model::{NewTransaction, PaymentMethod, Transaction};
pub use status::TransactionStatus;
