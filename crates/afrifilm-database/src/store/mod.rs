//! Store traits the service layer depends on.
//!
//! Postgres repositories implement these for production and
//! [`MemoryStore`](crate::memory::MemoryStore) implements them for tests
//! and local demos.

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_entity::content::{Content, ContentKind, CreateContent, MediaLocator, UpdateContent};
use afrifilm_entity::transaction::{NewTransaction, PaymentMethod, Transaction};
use afrifilm_entity::user::{CreateUser, User};

/// Result of an atomic duplicate-check-then-insert purchase.
#[derive(Debug, Clone)]
pub enum PurchaseOutcome {
    /// A new transaction was recorded.
    Created(Transaction),
    /// A paid transaction already exists for the pair.
    AlreadyPaid(Transaction),
    /// An unpaid transaction inside the pending window exists for the pair.
    InFlight(Transaction),
}

/// User account storage.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Duplicate username or email is a `Conflict`.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Set the verification flag. Returns `None` if the user does not exist.
    async fn set_verified(&self, id: Uuid, verified: bool) -> AppResult<Option<User>>;

    /// List all users, newest first.
    async fn list(&self, page: PageRequest) -> AppResult<PageResponse<User>>;
}

/// Catalog storage: content rows plus their film or series media.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug {
    /// Find a content row regardless of approval state.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Content>>;

    /// Load the media locators of a content item.
    async fn find_media(&self, content: &Content) -> AppResult<Option<MediaLocator>>;

    /// Insert a content row and its media in one unit.
    async fn create(&self, data: CreateContent) -> AppResult<Content>;

    /// Update catalog fields. Any edit resets `is_approved` to false.
    async fn update(&self, id: Uuid, data: UpdateContent) -> AppResult<Option<Content>>;

    /// Flip the approval flag.
    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<Option<Content>>;

    /// Delete a content item with its media and every transaction that
    /// references it. Returns the number of transactions removed, or `None`
    /// if the content did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<Option<u64>>;

    /// Approved content, newest first, optionally filtered by kind.
    async fn list_approved(
        &self,
        kind: Option<ContentKind>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>>;

    /// Content awaiting moderation, oldest first.
    async fn list_pending(&self, page: PageRequest) -> AppResult<PageResponse<Content>>;

    /// All content owned by a creator, newest first.
    async fn list_by_creator(
        &self,
        creator_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>>;
}

/// Append-only purchase ledger.
#[async_trait]
pub trait TransactionLedger: Send + Sync + std::fmt::Debug {
    /// Find a transaction by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>>;

    /// The most recent paid transaction for the pair.
    async fn find_paid(&self, user_id: Uuid, content_id: Uuid) -> AppResult<Option<Transaction>>;

    /// The most recent unpaid transaction for the pair created within `window`.
    async fn find_recent_unpaid(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        window: Duration,
    ) -> AppResult<Option<Transaction>>;

    /// Append a transaction without duplicate checks.
    async fn insert(&self, data: NewTransaction) -> AppResult<Transaction>;

    /// Check for a paid or in-flight transaction and insert a new one, as a
    /// single unit serialized per (user, content) pair.
    async fn begin_purchase(&self, data: NewTransaction, window: Duration)
    -> AppResult<PurchaseOutcome>;

    /// Mark a transaction paid and record its payment method and reference.
    /// An existing reference is kept. Fails with `AlreadyPurchased` if another
    /// paid transaction exists for the same pair.
    async fn settle(
        &self,
        id: Uuid,
        method: PaymentMethod,
        reference: &str,
    ) -> AppResult<Option<Transaction>>;

    /// A user's transactions, newest first.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Transaction>>;
}
