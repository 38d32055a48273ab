//! Cache key builders for all AfriFilm cache entries.
//!
//! Keys are laid out so that every invalidation is a trailing-wildcard
//! pattern. The Redis provider adds its configured prefix on top.

use uuid::Uuid;

/// Cache key holding the id of the paid transaction that grants `user_id`
/// access to `content_id`.
pub fn access_grant(content_id: Uuid, user_id: Uuid) -> String {
    format!("access:{content_id}:{user_id}")
}

/// Pattern matching every access grant for a content item.
pub fn access_grants_for_content(content_id: Uuid) -> String {
    format!("access:{content_id}:*")
}

/// Key written and read back by the readiness probe.
pub fn readiness_probe() -> String {
    "health:probe".to_string()
}
