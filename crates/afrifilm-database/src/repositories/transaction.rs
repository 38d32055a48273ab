//! Transaction ledger repository implementation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{PgPool, Postgres};
use tracing::debug;
use uuid::Uuid;

use afrifilm_core::error::{AppError, ErrorKind};
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_entity::transaction::{NewTransaction, PaymentMethod, Transaction};

use super::{is_unique_violation, sql_bound};
use crate::store::{PurchaseOutcome, TransactionLedger};

const FIND_PAID_SQL: &str = r#"SELECT * FROM transactions
    WHERE user_id = $1 AND content_id = $2 AND is_paid = TRUE
    ORDER BY created_at DESC LIMIT 1"#;

const FIND_RECENT_UNPAID_SQL: &str = r#"SELECT * FROM transactions
    WHERE user_id = $1 AND content_id = $2 AND is_paid = FALSE AND created_at > $3
    ORDER BY created_at DESC LIMIT 1"#;

const INSERT_SQL: &str = r#"INSERT INTO transactions (id, user_id, content_id, amount, is_paid)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING *"#;

/// Repository for purchase transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    /// Create a new transaction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_with<'e, E>(executor: E, data: &NewTransaction) -> Result<Transaction, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Transaction>(INSERT_SQL)
            .bind(Uuid::new_v4())
            .bind(data.user_id)
            .bind(data.content_id)
            .bind(data.amount)
            .bind(data.is_paid)
            .fetch_one(executor)
            .await
    }
}

/// Advisory lock key for a (user, content) pair.
fn pair_lock_key(user_id: Uuid, content_id: Uuid) -> String {
    format!("purchase:{user_id}:{content_id}")
}

#[async_trait]
impl TransactionLedger for TransactionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find transaction", e)
            })
    }

    async fn find_paid(&self, user_id: Uuid, content_id: Uuid) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(FIND_PAID_SQL)
            .bind(user_id)
            .bind(content_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find paid transaction", e)
            })
    }

    async fn find_recent_unpaid(
        &self,
        user_id: Uuid,
        content_id: Uuid,
        window: Duration,
    ) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(FIND_RECENT_UNPAID_SQL)
            .bind(user_id)
            .bind(content_id)
            .bind(Utc::now() - window)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find pending transaction", e)
            })
    }

    async fn insert(&self, data: NewTransaction) -> AppResult<Transaction> {
        Self::insert_with(&self.pool, &data).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_purchased("Content already purchased")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to insert transaction", e)
            }
        })
    }

    async fn begin_purchase(
        &self,
        data: NewTransaction,
        window: Duration,
    ) -> AppResult<PurchaseOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serializes concurrent purchases of the same pair until commit.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(pair_lock_key(data.user_id, data.content_id))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to acquire purchase lock", e)
            })?;

        let paid = sqlx::query_as::<_, Transaction>(FIND_PAID_SQL)
            .bind(data.user_id)
            .bind(data.content_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find paid transaction", e)
            })?;
        if let Some(existing) = paid {
            return Ok(PurchaseOutcome::AlreadyPaid(existing));
        }

        let pending = sqlx::query_as::<_, Transaction>(FIND_RECENT_UNPAID_SQL)
            .bind(data.user_id)
            .bind(data.content_id)
            .bind(Utc::now() - window)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find pending transaction", e)
            })?;
        if let Some(existing) = pending {
            return Ok(PurchaseOutcome::InFlight(existing));
        }

        let created = match Self::insert_with(&mut *tx, &data).await {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => {
                drop(tx);
                debug!(
                    user_id = %data.user_id,
                    content_id = %data.content_id,
                    "Paid-pair index rejected insert"
                );
                return match self.find_paid(data.user_id, data.content_id).await? {
                    Some(existing) => Ok(PurchaseOutcome::AlreadyPaid(existing)),
                    None => Err(AppError::already_purchased("Content already purchased")),
                };
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to insert transaction",
                    e,
                ));
            }
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit purchase", e)
        })?;

        Ok(PurchaseOutcome::Created(created))
    }

    async fn settle(
        &self,
        id: Uuid,
        method: PaymentMethod,
        reference: &str,
    ) -> AppResult<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(
            r#"UPDATE transactions
               SET is_paid = TRUE, payment_method = $2,
                   reference = COALESCE(reference, $3), updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(method)
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_purchased("Content already purchased")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to settle transaction", e)
            }
        })
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Transaction>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count transactions", e)
            })?;

        let items = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list transactions", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContentStore, UserStore};
    use crate::repositories::{ContentRepository, UserRepository};
    use afrifilm_entity::content::{CreateContent, NewMedia};
    use afrifilm_entity::user::{CreateUser, UserRole};

    async fn pool() -> Option<PgPool> {
        let url = std::env::var("AFRIFILM_TEST_DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.expect("connect to test database");
        crate::migration::run_migrations(&pool)
            .await
            .expect("migrate test database");
        Some(pool)
    }

    async fn seed(pool: &PgPool) -> (Uuid, Uuid) {
        let users = UserRepository::new(pool.clone());
        let contents = ContentRepository::new(pool.clone());
        let suffix = Uuid::new_v4().simple().to_string();
        let creator = users
            .create(CreateUser {
                username: format!("creator_{suffix}"),
                email: format!("creator_{suffix}@example.com"),
                password_hash: "x".into(),
                role: UserRole::Creator,
                is_verified: true,
            })
            .await
            .expect("creator");
        let viewer = users
            .create(CreateUser {
                username: format!("viewer_{suffix}"),
                email: format!("viewer_{suffix}@example.com"),
                password_hash: "x".into(),
                role: UserRole::Viewer,
                is_verified: false,
            })
            .await
            .expect("viewer");
        let content = contents
            .create(CreateContent {
                title: "Atlantics".into(),
                description: None,
                price: Some(4.99),
                creator_id: creator.id,
                poster_url: None,
                is_approved: true,
                media: NewMedia::Film {
                    video_url: "https://cdn.example.com/atlantics.m3u8".into(),
                    duration: Some(104),
                },
            })
            .await
            .expect("content");
        (viewer.id, content.id)
    }

    #[tokio::test]
    #[ignore = "requires AFRIFILM_TEST_DATABASE_URL"]
    async fn test_concurrent_purchases_record_one_paid_row() {
        let Some(pool) = pool().await else { return };
        let (user_id, content_id) = seed(&pool).await;
        let ledger = TransactionRepository::new(pool.clone());

        let attempts = (0..8).map(|_| {
            let ledger = ledger.clone();
            async move {
                ledger
                    .begin_purchase(
                        NewTransaction { user_id, content_id, amount: 4.99, is_paid: true },
                        Duration::minutes(30),
                    )
                    .await
            }
        });
        let outcomes = futures::future::join_all(attempts).await;

        let created = outcomes
            .iter()
            .filter(|o| matches!(o, Ok(PurchaseOutcome::Created(_))))
            .count();
        assert_eq!(created, 1);

        let paid: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE user_id = $1 AND content_id = $2 AND is_paid",
        )
        .bind(user_id)
        .bind(content_id)
        .fetch_one(&pool)
        .await
        .expect("count");
        assert_eq!(paid, 1);
    }

    #[tokio::test]
    #[ignore = "requires AFRIFILM_TEST_DATABASE_URL"]
    async fn test_content_delete_cascades_transactions() {
        let Some(pool) = pool().await else { return };
        let (user_id, content_id) = seed(&pool).await;
        let ledger = TransactionRepository::new(pool.clone());
        let contents = ContentRepository::new(pool.clone());

        let tx = ledger
            .insert(NewTransaction { user_id, content_id, amount: 4.99, is_paid: false })
            .await
            .expect("insert");

        assert_eq!(contents.delete(content_id).await.expect("delete"), Some(1));
        assert!(ledger.find_by_id(tx.id).await.expect("lookup").is_none());
        assert_eq!(contents.delete(content_id).await.expect("delete again"), None);
    }
}
