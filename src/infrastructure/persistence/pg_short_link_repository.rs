//! PostgreSQL implementation of the identifier store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository backed by the `short_links` table.
///
/// Uniqueness of `short_id` is enforced by the `short_links_short_id_key`
/// constraint; inserts use `ON CONFLICT DO NOTHING` so a collision surfaces
/// as `None` instead of an error.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn exists(&self, short_id: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM short_links WHERE short_id = $1)")
                .bind(short_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, short_id, original_url, clicks, created_at
            FROM short_links
            WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn insert_if_absent(
        &self,
        new_link: NewShortLink,
    ) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            INSERT INTO short_links (short_id, original_url)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT short_links_short_id_key DO NOTHING
            RETURNING id, short_id, original_url, clicks, created_at
            "#,
        )
        .bind(&new_link.short_id)
        .bind(&new_link.original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_clicks(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        let link = sqlx::query_as::<_, ShortLink>(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1
            WHERE short_id = $1
            RETURNING id, short_id, original_url, clicks, created_at
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn top_by_clicks(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        let links = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, short_id, original_url, clicks, created_at
            FROM short_links
            ORDER BY clicks DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }
}
