//! Access-rights hint cache.
//!
//! Entries map (content, user) to the id of the paid transaction that
//! granted access. A hit is never trusted on its own: the engine re-reads the
//! transaction from the ledger before granting. Cache failures are logged and
//! swallowed.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use uuid::Uuid;

use afrifilm_cache::CacheManager;
use afrifilm_cache::keys;
use afrifilm_core::config::EntitlementConfig;
use afrifilm_core::traits::CacheProvider;

/// Best-effort cache of paid-transaction ids per (content, user).
#[derive(Debug, Clone)]
pub struct AccessCache {
    /// `None` when the cache is disabled.
    cache: Option<Arc<CacheManager>>,
    ttl: Duration,
}

impl AccessCache {
    /// Creates an access cache over the shared cache manager.
    pub fn new(cache: Arc<CacheManager>, config: &EntitlementConfig) -> Self {
        Self {
            cache: config.access_cache_enabled.then_some(cache),
            ttl: Duration::from_secs(config.access_cache_ttl_seconds),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            cache: None,
            ttl: Duration::ZERO,
        }
    }

    /// The cached transaction id for the pair, if any.
    pub async fn lookup(&self, content_id: Uuid, user_id: Uuid) -> Option<Uuid> {
        let cache = self.cache.as_ref()?;
        match cache.get(&keys::access_grant(content_id, user_id)).await {
            Ok(value) => value.and_then(|v| Uuid::parse_str(&v).ok()),
            Err(e) => {
                warn!(content_id = %content_id, user_id = %user_id, error = %e, "Access cache read failed");
                None
            }
        }
    }

    /// Remember that `transaction_id` grants the pair access.
    pub async fn remember(&self, content_id: Uuid, user_id: Uuid, transaction_id: Uuid) {
        let Some(cache) = &self.cache else { return };
        let key = keys::access_grant(content_id, user_id);
        if let Err(e) = cache.set(&key, &transaction_id.to_string(), self.ttl).await {
            warn!(content_id = %content_id, user_id = %user_id, error = %e, "Access cache write failed");
        }
    }

    /// Drop a single stale entry.
    pub async fn forget(&self, content_id: Uuid, user_id: Uuid) {
        let Some(cache) = &self.cache else { return };
        if let Err(e) = cache.delete(&keys::access_grant(content_id, user_id)).await {
            warn!(content_id = %content_id, user_id = %user_id, error = %e, "Access cache delete failed");
        }
    }

    /// Drop every entry for a content item.
    pub async fn forget_content(&self, content_id: Uuid) -> u64 {
        let Some(cache) = &self.cache else { return 0 };
        match cache
            .delete_pattern(&keys::access_grants_for_content(content_id))
            .await
        {
            Ok(n) => n,
            Err(e) => {
                warn!(content_id = %content_id, error = %e, "Access cache invalidation failed");
                0
            }
        }
    }
}
