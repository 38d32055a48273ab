//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use afrifilm_auth::{IdentityResolver, JwtDecoder, RbacEnforcer};
use afrifilm_cache::CacheManager;
use afrifilm_core::config::AppConfig;
use afrifilm_database::{
    ContentStore, DatabasePool, MemoryStore, TransactionLedger, UserStore,
};
use afrifilm_service::{
    AccessCache, AccountService, CatalogService, EntitlementEngine, ModerationService,
};

/// The three stores the services run on.
#[derive(Debug, Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub contents: Arc<dyn ContentStore>,
    pub ledger: Arc<dyn TransactionLedger>,
}

impl Stores {
    /// Postgres-backed stores.
    pub fn postgres(db: &DatabasePool) -> Self {
        let (users, contents, ledger) = db.repositories();
        Self {
            users: Arc::new(users),
            contents: Arc::new(contents),
            ledger: Arc::new(ledger),
        }
    }

    /// Stores sharing one in-memory table set.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            contents: Arc::new(store.clone()),
            ledger: Arc::new(store),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; `None` when running on the in-memory store
    pub db: Option<DatabasePool>,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Credential to principal resolution
    pub identity: Arc<IdentityResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub accounts: Arc<AccountService>,
    /// Catalog browsing and publishing
    pub catalog: Arc<CatalogService>,
    /// Access decisions and purchases
    pub entitlement: Arc<EntitlementEngine>,
    /// Moderation and deletion
    pub moderation: Arc<ModerationService>,
}

impl AppState {
    /// Wire every service over the given stores.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        cache: Arc<CacheManager>,
        db: Option<DatabasePool>,
    ) -> Self {
        let rbac = Arc::new(RbacEnforcer::new());
        let access_cache = AccessCache::new(Arc::clone(&cache), &config.entitlement);

        let identity = Arc::new(IdentityResolver::new(
            JwtDecoder::new(&config.auth),
            Arc::clone(&stores.users),
        ));
        let accounts = Arc::new(AccountService::new(Arc::clone(&stores.users), &config.auth));
        let entitlement = Arc::new(EntitlementEngine::new(
            Arc::clone(&stores.contents),
            Arc::clone(&stores.ledger),
            access_cache.clone(),
            &config.entitlement,
            &config.payment,
        ));
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&stores.contents),
            Arc::clone(&entitlement),
            Arc::clone(&rbac),
        ));
        let moderation = Arc::new(ModerationService::new(
            Arc::clone(&stores.contents),
            Arc::clone(&stores.users),
            access_cache,
            rbac,
        ));

        Self {
            config: Arc::new(config),
            db,
            cache,
            identity,
            accounts,
            catalog,
            entitlement,
            moderation,
        }
    }
}
