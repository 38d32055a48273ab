//! Admin-only handlers.

pub mod contents;
pub mod users;
