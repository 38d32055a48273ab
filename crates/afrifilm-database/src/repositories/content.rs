//! Content repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use afrifilm_core::error::{AppError, ErrorKind};
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_entity::content::{
    Content, ContentKind, CreateContent, Episode, Film, MediaLocator, NewMedia, Season,
    UpdateContent,
};

use super::sql_bound;
use crate::store::ContentStore;

/// Repository for content rows and their film/series media.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Create a new content repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for ContentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Content>> {
        sqlx::query_as::<_, Content>("SELECT * FROM contents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find content", e))
    }

    async fn find_media(&self, content: &Content) -> AppResult<Option<MediaLocator>> {
        match content.kind {
            ContentKind::Film => {
                let film = sqlx::query_as::<_, Film>("SELECT * FROM films WHERE content_id = $1")
                    .bind(content.id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to load film", e)
                    })?;
                Ok(film.map(MediaLocator::from_film))
            }
            ContentKind::Serie => {
                let seasons = sqlx::query_as::<_, Season>(
                    "SELECT * FROM seasons WHERE content_id = $1 ORDER BY number",
                )
                .bind(content.id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load seasons", e))?;

                let episodes = sqlx::query_as::<_, Episode>(
                    r#"SELECT e.* FROM episodes e
                       JOIN seasons s ON s.id = e.season_id
                       WHERE s.content_id = $1
                       ORDER BY e.number"#,
                )
                .bind(content.id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load episodes", e)
                })?;

                Ok(Some(MediaLocator::from_series(seasons, episodes)))
            }
        }
    }

    async fn create(&self, data: CreateContent) -> AppResult<Content> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let content = sqlx::query_as::<_, Content>(
            r#"INSERT INTO contents (id, title, description, kind, price, is_approved, creator_id, poster_url)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.media.kind())
        .bind(data.price)
        .bind(data.is_approved)
        .bind(data.creator_id)
        .bind(&data.poster_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create content", e))?;

        match &data.media {
            NewMedia::Film { video_url, duration } => {
                sqlx::query("INSERT INTO films (content_id, video_url, duration) VALUES ($1, $2, $3)")
                    .bind(content.id)
                    .bind(video_url)
                    .bind(duration)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to create film", e)
                    })?;
            }
            NewMedia::Serie { seasons } => {
                for season in seasons {
                    let season_id = Uuid::new_v4();
                    sqlx::query(
                        "INSERT INTO seasons (id, content_id, number, title) VALUES ($1, $2, $3, $4)",
                    )
                    .bind(season_id)
                    .bind(content.id)
                    .bind(season.number)
                    .bind(&season.title)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to create season", e)
                    })?;

                    for episode in &season.episodes {
                        sqlx::query(
                            r#"INSERT INTO episodes (id, season_id, number, title, video_url)
                               VALUES ($1, $2, $3, $4, $5)"#,
                        )
                        .bind(Uuid::new_v4())
                        .bind(season_id)
                        .bind(episode.number)
                        .bind(&episode.title)
                        .bind(&episode.video_url)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| {
                            AppError::with_source(ErrorKind::Database, "Failed to create episode", e)
                        })?;
                    }
                }
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit content", e)
        })?;

        Ok(content)
    }

    async fn update(&self, id: Uuid, data: UpdateContent) -> AppResult<Option<Content>> {
        let Some(mut content) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        data.apply(&mut content);

        sqlx::query_as::<_, Content>(
            r#"UPDATE contents
               SET title = $2, description = $3, price = $4, poster_url = $5,
                   is_approved = FALSE, updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.price)
        .bind(&content.poster_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update content", e))
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> AppResult<Option<Content>> {
        sqlx::query_as::<_, Content>(
            "UPDATE contents SET is_approved = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update content approval", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<u64>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Counted explicitly; the FK cascade would remove them anyway.
        let removed = sqlx::query("DELETE FROM transactions WHERE content_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete transactions", e)
            })?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete content", e))?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back", e)
            })?;
            return Ok(None);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit content deletion", e)
        })?;

        Ok(Some(removed))
    }

    async fn list_approved(
        &self,
        kind: Option<ContentKind>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contents
               WHERE is_approved = TRUE AND ($1::content_kind IS NULL OR kind = $1)"#,
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count contents", e))?;

        let items = sqlx::query_as::<_, Content>(
            r#"SELECT * FROM contents
               WHERE is_approved = TRUE AND ($1::content_kind IS NULL OR kind = $1)
               ORDER BY created_at DESC LIMIT $2 OFFSET $3"#,
        )
        .bind(kind)
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list contents", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn list_pending(&self, page: PageRequest) -> AppResult<PageResponse<Content>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contents WHERE is_approved = FALSE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count pending contents", e)
            })?;

        let items = sqlx::query_as::<_, Content>(
            "SELECT * FROM contents WHERE is_approved = FALSE ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending contents", e)
        })?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn list_by_creator(
        &self,
        creator_id: Uuid,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contents WHERE creator_id = $1")
            .bind(creator_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count creator contents", e)
            })?;

        let items = sqlx::query_as::<_, Content>(
            "SELECT * FROM contents WHERE creator_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(creator_id)
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list creator contents", e)
        })?;

        Ok(PageResponse::new(items, page, total as u64))
    }
}
