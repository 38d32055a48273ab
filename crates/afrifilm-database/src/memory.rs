//! In-memory store using a Tokio mutex, for tests and single-node demos.
//!
//! One [`MemoryStore`] implements every store trait over a shared set of
//! tables, so cascades and check-then-insert run under a single lock just as
//! they run inside one database transaction.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_entity::content::{
    Content, ContentKind, CreateContent, Episode, Film, MediaLocator, NewMedia, Season,
    UpdateContent,
};
use afrifilm_entity::transaction::{NewTransaction, PaymentMethod, Transaction};
use afrifilm_entity::user::{CreateUser, User};

use crate::store::{ContentStore, PurchaseOutcome, TransactionLedger, UserStore};

/// Row storage. Vectors keep insertion order, which doubles as creation order.
#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    contents: Vec<Content>,
    films: HashMap<Uuid, Film>,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    transactions: Vec<Transaction>,
}

impl Tables {
    fn find_paid(&self, user_id: Uuid, content_id: Uuid) -> Option<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .find(|t| t.user_id == user_id && t.content_id == content_id && t.is_paid)
    }

    fn find_recent_unpaid(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        window: Duration,
    ) -> Option<&Transaction> {
        let now = Utc::now();
        self.transactions.iter().rev().find(|t| {
            t.user_id == user_id && t.content_id == content_id && t.is_in_flight(window, now)
        })
    }

    fn content_exists(&self, id: Uuid) -> bool {
        self.contents.iter().any(|c| c.id == id)
    }

    fn insert_transaction(&mut self, data: &NewTransaction) -> AppResult<Transaction> {
        if !self.users.iter().any(|u| u.id == data.user_id) || !self.content_exists(data.content_id)
        {
            return Err(AppError::database("Transaction references a missing user or content"));
        }
        if data.is_paid && self.find_paid(data.user_id, data.content_id).is_some() {
            return Err(AppError::already_purchased("Content already purchased"));
        }
        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            content_id: data.content_id,
            amount: data.amount,
            is_paid: data.is_paid,
            payment_method: None,
            reference: None,
            created_at: now,
            updated_at: now,
        };
        self.transactions.push(tx.clone());
        Ok(tx)
    }
}

/// Newest-first page over an already filtered, insertion-ordered list.
fn newest_first<T>(items: Vec<T>, page: PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .rev()
        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
        .collect();
    PageResponse::new(items, page, total)
}

/// In-memory implementation of [`UserStore`], [`ContentStore`] and
/// [`TransactionLedger`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift a transaction's creation time into the past.
    pub async fn backdate_transaction(&self, id: Uuid, by: Duration) -> bool {
        let mut state = self.state.lock().await;
        match state.transactions.iter_mut().find(|t| t.id == id) {
            Some(tx) => {
                tx.created_at -= by;
                true
            }
            None => false,
        }
    }

    /// Number of stored transactions for a pair, paid or not.
    pub async fn transaction_count(&self, user_id: Uuid, content_id: Uuid) -> usize {
        let state = self.state.lock().await;
        state
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id && t.content_id == content_id)
            .count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| {
            u.username.eq_ignore_ascii_case(&data.username) || u.email.eq_ignore_ascii_case(&data.email)
        }) {
            return Err(AppError::conflict("Username or email already registered"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            is_verified: data.is_verified,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn set_verified(&self, id: Uuid, verified: bool) -> AppResult<Option<User>> {
        let mut state = self.state.lock().await;
        Ok(state.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.is_verified = verified;
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn list(&self, page: PageRequest) -> AppResult<PageResponse<User>> {
        let state = self.state.lock().await;
        Ok(newest_first(state.users.clone(), page))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Content>> {
        let state = self.state.lock().await;
        Ok(state.contents.iter().find(|c| c.id == id).cloned())
    }

    async fn find_media(&self, content: &Content) -> AppResult<Option<MediaLocator>> {
        let state = self.state.lock().await;
        Ok(match content.kind {
            ContentKind::Film => state.films.get(&content.id).cloned().map(MediaLocator::from_film),
            ContentKind::Serie => {
                let seasons: Vec<Season> = state
                    .seasons
                    .iter()
                    .filter(|s| s.content_id == content.id)
                    .cloned()
                    .collect();
                let episodes = state
                    .episodes
                    .iter()
                    .filter(|e| seasons.iter().any(|s| s.id == e.season_id))
                    .cloned()
                    .collect();
                Some(MediaLocator::from_series(seasons, episodes))
            }
        })
    }

    async fn create(&self, data: CreateContent) -> AppResult<Content> {
        let mut state = self.state.lock().await;
        if !state.users.iter().any(|u| u.id == data.creator_id) {
            return Err(AppError::database("Content references a missing creator"));
        }
        let now = Utc::now();
        let content = Content {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            kind: data.media.kind(),
            price: data.price,
            is_approved: data.is_approved,
            creator_id: data.creator_id,
            poster_url: data.poster_url,
            created_at: now,
            updated_at: now,
        };

        match data.media {
            NewMedia::Film { video_url, duration } => {
                state.films.insert(
                    content.id,
                    Film {
                        content_id: content.id,
                        video_url,
                        duration,
                    },
                );
            }
            NewMedia::Serie { seasons } => {
                for season in seasons {
                    let season_id = Uuid::new_v4();
                    state.seasons.push(Season {
                        id: season_id,
                        content_id: content.id,
                        number: season.number,
                        title: season.title,
                    });
                    for episode in season.episodes {
                        state.episodes.push(Episode {
                            id: Uuid::new_v4(),
                            season_id,
                            number: episode.number,
                            title: episode.title,
                            video_url: episode.video_url,
                        });
                    }
                }
            }
        }

        state.contents.push(content.clone());
        Ok(content)
    }

    async fn update(&self, id: Uuid, data: UpdateContent) -> AppResult<Option<Content>> {
        let mut state = self.state.lock().await;
        Ok(state.contents.iter_mut().find(|c| c.id == id).map(|c| {
            data.apply(c);
            c.is_approved = false;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<Option<Content>> {
        let mut state = self.state.lock().await;
        Ok(state.contents.iter_mut().find(|c| c.id == id).map(|c| {
            c.is_approved = approved;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<u64>> {
        let mut state = self.state.lock().await;
        if !state.content_exists(id) {
            return Ok(None);
        }

        let before = state.transactions.len();
        state.transactions.retain(|t| t.content_id != id);
        let removed = (before - state.transactions.len()) as u64;

        let season_ids: Vec<Uuid> = state
            .seasons
            .iter()
            .filter(|s| s.content_id == id)
            .map(|s| s.id)
            .collect();
        state.episodes.retain(|e| !season_ids.contains(&e.season_id));
        state.seasons.retain(|s| s.content_id != id);
        state.films.remove(&id);
        state.contents.retain(|c| c.id != id);

        debug!(content_id = %id, transactions_removed = removed, "Content removed from memory store");
        Ok(Some(removed))
    }

    async fn list_approved(
        &self,
        kind: Option<ContentKind>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        let state = self.state.lock().await;
        let items = state
            .contents
            .iter()
            .filter(|c| c.is_approved && kind.is_none_or(|k| c.kind == k))
            .cloned()
            .collect();
        Ok(newest_first(items, page))
    }

    async fn list_pending(&self, page: PageRequest) -> AppResult<PageResponse<Content>> {
        let state = self.state.lock().await;
        let pending: Vec<Content> = state.contents.iter().filter(|c| !c.is_approved).cloned().collect();
        let total = pending.len() as u64;
        let items = pending
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn list_by_creator(
        &self,
        creator_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        let state = self.state.lock().await;
        let items = state
            .contents
            .iter()
            .filter(|c| c.creator_id == creator_id)
            .cloned()
            .collect();
        Ok(newest_first(items, page))
    }
}

#[async_trait]
impl TransactionLedger for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        let state = self.state.lock().await;
        Ok(state.transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn find_paid(&self, user_id: Uuid, content_id: Uuid) -> AppResult<Option<Transaction>> {
        let state = self.state.lock().await;
        Ok(state.find_paid(user_id, content_id).cloned())
    }

    async fn find_recent_unpaid(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        window: Duration,
    ) -> AppResult<Option<Transaction>> {
        let state = self.state.lock().await;
        Ok(state.find_recent_unpaid(user_id, content_id, window).cloned())
    }

    async fn insert(&self, data: NewTransaction) -> AppResult<Transaction> {
        let mut state = self.state.lock().await;
        state.insert_transaction(&data)
    }

    async fn begin_purchase(
        &self,
        data: NewTransaction,
        window: Duration,
    ) -> AppResult<PurchaseOutcome> {
        let mut state = self.state.lock().await;

        if let Some(existing) = state.find_paid(data.user_id, data.content_id) {
            return Ok(PurchaseOutcome::AlreadyPaid(existing.clone()));
        }
        if let Some(existing) = state.find_recent_unpaid(data.user_id, data.content_id, window) {
            return Ok(PurchaseOutcome::InFlight(existing.clone()));
        }

        state.insert_transaction(&data).map(PurchaseOutcome::Created)
    }

    async fn settle(
        &self,
        id: Uuid,
        method: PaymentMethod,
        reference: &str,
    ) -> AppResult<Option<Transaction>> {
        let mut state = self.state.lock().await;

        let Some(pos) = state.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let (user_id, content_id) = {
            let tx = &state.transactions[pos];
            (tx.user_id, tx.content_id)
        };
        if state
            .find_paid(user_id, content_id)
            .is_some_and(|paid| paid.id != id)
        {
            return Err(AppError::already_purchased("Content already purchased"));
        }

        let tx = &mut state.transactions[pos];
        tx.is_paid = true;
        tx.payment_method = Some(method);
        if tx.reference.is_none() {
            tx.reference = Some(reference.to_string());
        }
        tx.updated_at = Utc::now();
        Ok(Some(tx.clone()))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Transaction>> {
        let state = self.state.lock().await;
        let items = state
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(items, page))
    }
}
