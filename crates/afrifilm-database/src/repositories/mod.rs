//! PostgreSQL implementations of the store traits.

pub mod content;
pub mod transaction;
pub mod user;

pub use content::ContentRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;

/// Whether a sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Clamp a page bound into the range Postgres accepts for `LIMIT`/`OFFSET`.
pub(crate) fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
