//! PostgreSQL implementation of ReactionTypeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactions_core::entities::ReactionType;
use reactions_core::error::DomainError;
use reactions_core::traits::{ReactionTypeRepository, RepoResult};

use crate::models::ReactionTypeModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgReactionTypeRepository {
    pool: PgPool,
}

impl PgReactionTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionTypeRepository for PgReactionTypeRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<ReactionType>> {
        let results = sqlx::query_as::<_, ReactionTypeModel>(
            r"
            SELECT id, name, uses_animated_icon, icon_ref, display_weight, created_at
            FROM reaction_types
            ORDER BY display_weight, name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ReactionType::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<ReactionType>> {
        let result = sqlx::query_as::<_, ReactionTypeModel>(
            r"
            SELECT id, name, uses_animated_icon, icon_ref, display_weight, created_at
            FROM reaction_types
            WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReactionType::from))
    }

    #[instrument(skip(self, reaction_type), fields(name = %reaction_type.name))]
    async fn create(&self, reaction_type: &ReactionType) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reaction_types
                (id, name, uses_animated_icon, icon_ref, display_weight, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reaction_type.id.into_inner())
        .bind(&reaction_type.name)
        .bind(reaction_type.uses_animated_icon)
        .bind(&reaction_type.icon_ref)
        .bind(reaction_type.display_weight)
        .bind(reaction_type.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::ReactionTypeExists(reaction_type.name.clone()))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> RepoResult<bool> {
        // reactions of this type go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM reaction_types WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
