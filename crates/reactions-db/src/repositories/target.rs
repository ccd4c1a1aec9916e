//! PostgreSQL implementation of TargetRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactions_core::entities::Target;
use reactions_core::traits::{RepoResult, TargetRepository};
use reactions_core::value_objects::TargetRef;

use crate::models::TargetModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgTargetRepository {
    pool: PgPool,
}

impl PgTargetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TargetRepository for PgTargetRepository {
    #[instrument(skip(self, target), fields(target = %target))]
    async fn find(&self, target: &TargetRef) -> RepoResult<Option<Target>> {
        let result = sqlx::query_as::<_, TargetModel>(
            r"
            SELECT target_type, target_id, bundle, title, created_at
            FROM reaction_targets
            WHERE target_type = $1 AND target_id = $2
            ",
        )
        .bind(&target.target_type)
        .bind(&target.target_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Target::from))
    }

    #[instrument(skip(self, target), fields(target = %target.target))]
    async fn register(&self, target: &Target) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reaction_targets (target_type, target_id, bundle, title, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (target_type, target_id)
            DO UPDATE SET bundle = EXCLUDED.bundle, title = EXCLUDED.title
            ",
        )
        .bind(&target.target.target_type)
        .bind(&target.target.target_id)
        .bind(target.bundle.as_deref())
        .bind(&target.title)
        .bind(target.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, target), fields(target = %target))]
    async fn delete(&self, target: &TargetRef) -> RepoResult<bool> {
        let result = sqlx::query(
            "DELETE FROM reaction_targets WHERE target_type = $1 AND target_id = $2",
        )
        .bind(&target.target_type)
        .bind(&target.target_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
