//! PostgreSQL implementation of GiftCatalog

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::Gift;
use live_core::error::DomainError;
use live_core::traits::{GiftCatalog, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::GiftModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgGiftCatalog {
    pool: PgPool,
}

impl PgGiftCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftCatalog for PgGiftCatalog {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Gift>> {
        let result = sqlx::query_as::<_, GiftModel>(
            r#"
            SELECT id, streamer_id, name, emoji, cost, points, description, created_at
            FROM gifts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Gift::from))
    }

    #[instrument(skip(self))]
    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<Gift>> {
        let results = sqlx::query_as::<_, GiftModel>(
            r#"
            SELECT id, streamer_id, name, emoji, cost, points, description, created_at
            FROM gifts
            WHERE streamer_id = $1
            ORDER BY cost ASC, id ASC
            "#,
        )
        .bind(streamer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Gift::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Gift>> {
        let results = sqlx::query_as::<_, GiftModel>(
            r#"
            SELECT id, streamer_id, name, emoji, cost, points, description, created_at
            FROM gifts
            ORDER BY cost ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Gift::from).collect())
    }

    #[instrument(skip(self, gift), fields(gift_id = %gift.id, name = %gift.name))]
    async fn create(&self, gift: &Gift) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO gifts (id, streamer_id, name, emoji, cost, points, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(gift.id.into_inner())
        .bind(gift.streamer_id.into_inner())
        .bind(&gift.name)
        .bind(&gift.emoji)
        .bind(gift.cost)
        .bind(gift.points)
        .bind(&gift.description)
        .bind(gift.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::GiftNameExists(gift.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, streamer_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM gifts WHERE id = $1 AND streamer_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(streamer_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GiftNotFound(id));
        }

        Ok(())
    }
}
