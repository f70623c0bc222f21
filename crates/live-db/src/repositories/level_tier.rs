//! PostgreSQL implementation of LevelTierRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::LevelTier;
use live_core::error::DomainError;
use live_core::traits::{LevelTierRepository, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::LevelTierModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgLevelTierRepository {
    pool: PgPool,
}

impl PgLevelTierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LevelTierRepository for PgLevelTierRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LevelTier>> {
        let result = sqlx::query_as::<_, LevelTierModel>(
            r#"
            SELECT id, streamer_id, level_number, level_name, required_points, created_at
            FROM level_tiers
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LevelTier::from))
    }

    #[instrument(skip(self))]
    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>> {
        let results = sqlx::query_as::<_, LevelTierModel>(
            r#"
            SELECT id, streamer_id, level_number, level_name, required_points, created_at
            FROM level_tiers
            WHERE streamer_id = $1
            ORDER BY level_number ASC
            "#,
        )
        .bind(streamer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LevelTier::from).collect())
    }

    #[instrument(skip(self, tier), fields(tier_id = %tier.id, level = tier.level_number))]
    async fn create(&self, tier: &LevelTier) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO level_tiers (id, streamer_id, level_number, level_name, required_points, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(tier.id.into_inner())
        .bind(tier.streamer_id.into_inner())
        .bind(tier.level_number)
        .bind(&tier.level_name)
        .bind(tier.required_points)
        .bind(tier.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::LevelTierExists(tier.level_number)))?;

        Ok(())
    }

    #[instrument(skip(self, tier), fields(tier_id = %tier.id))]
    async fn update(&self, tier: &LevelTier) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE level_tiers
            SET level_name = $2, required_points = $3
            WHERE id = $1
            "#,
        )
        .bind(tier.id.into_inner())
        .bind(&tier.level_name)
        .bind(tier.required_points)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LevelTierNotFound(tier.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM level_tiers WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LevelTierNotFound(id));
        }

        Ok(())
    }
}
