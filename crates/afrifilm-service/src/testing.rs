//! Shared fixtures for service tests, wired over the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use afrifilm_auth::{Principal, RbacEnforcer};
use afrifilm_cache::CacheManager;
use afrifilm_cache::memory::MemoryCacheProvider;
use afrifilm_core::config::{
    CreatorAccess, EntitlementConfig, MemoryCacheConfig, PaymentConfig, SettlementMode,
};
use afrifilm_database::{ContentStore, MemoryStore, UserStore};
use afrifilm_entity::content::{Content, CreateContent, NewMedia};
use afrifilm_entity::user::{CreateUser, UserRole};

use crate::catalog::CatalogService;
use crate::entitlement::{AccessCache, EntitlementEngine};
use crate::moderation::ModerationService;

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub access_cache: AccessCache,
    pub engine: EntitlementEngine,
    pub catalog: CatalogService,
    pub moderation: ModerationService,
    owner: Principal,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_policy(CreatorAccess::Own, SettlementMode::OnConfirm, 0.0).await
    }

    pub async fn with_policy(
        creator_access: CreatorAccess,
        settlement: SettlementMode,
        failure_probability: f64,
    ) -> Self {
        let store = MemoryStore::new();
        let entitlement = EntitlementConfig {
            creator_access,
            ..EntitlementConfig::default()
        };
        let payment = PaymentConfig {
            settlement,
            failure_probability,
            ..PaymentConfig::default()
        };

        let cache = Arc::new(CacheManager::from_provider(
            Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig::default())),
            Duration::from_secs(60),
        ));
        let access_cache = AccessCache::new(cache, &entitlement);
        let rbac = Arc::new(RbacEnforcer::new());

        let contents: Arc<dyn ContentStore> = Arc::new(store.clone());
        let engine = EntitlementEngine::new(
            contents.clone(),
            Arc::new(store.clone()),
            access_cache.clone(),
            &entitlement,
            &payment,
        );
        let catalog = CatalogService::new(contents.clone(), Arc::new(engine.clone()), rbac.clone());
        let moderation = ModerationService::new(
            contents,
            Arc::new(store.clone()),
            access_cache.clone(),
            rbac,
        );

        let owner = add_user(&store, "owner", UserRole::Creator, true).await;

        Self {
            store,
            access_cache,
            engine,
            catalog,
            moderation,
            owner,
        }
    }

    /// The verified creator owning every title made by [`Fixture::film`].
    pub async fn owner(&self) -> Principal {
        self.owner.clone()
    }

    pub async fn viewer(&self) -> Principal {
        let name = format!("viewer_{}", Uuid::new_v4().simple());
        add_user(&self.store, &name, UserRole::Viewer, false).await
    }

    pub async fn admin(&self) -> Principal {
        let name = format!("admin_{}", Uuid::new_v4().simple());
        add_user(&self.store, &name, UserRole::Admin, true).await
    }

    pub async fn creator(&self, name: &str) -> Principal {
        add_user(&self.store, name, UserRole::Creator, true).await
    }

    pub async fn unverified_creator(&self, name: &str) -> Principal {
        add_user(&self.store, name, UserRole::Creator, false).await
    }

    pub async fn film(&self, price: Option<f64>, is_approved: bool) -> Content {
        ContentStore::create(
            &self.store,
            CreateContent {
                title: "Touki Bouki".into(),
                description: None,
                price,
                creator_id: self.owner.user_id,
                poster_url: None,
                is_approved,
                media: NewMedia::Film {
                    video_url: "https://cdn.example.com/touki-bouki.m3u8".into(),
                    duration: Some(85),
                },
            },
        )
        .await
        .expect("create film")
    }
}

async fn add_user(store: &MemoryStore, username: &str, role: UserRole, is_verified: bool) -> Principal {
    let user = UserStore::create(
        store,
        CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "unused".into(),
            role,
            is_verified,
        },
    )
    .await
    .expect("create user");
    Principal::from(&user)
}
