//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactions_core::entities::Reaction;
use reactions_core::error::DomainError;
use reactions_core::traits::{ReactionRepository, RepoResult};
use reactions_core::value_objects::{SessionToken, Snowflake, TargetRef, ViewerKey};

use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{map_db_error, map_foreign_key_violation};

const SELECT_REACTION: &str = r"
    SELECT r.id, r.account_id, r.session_token, r.target_type, r.target_id,
           t.name AS reaction_type, r.created_at
    FROM reactions r
    JOIN reaction_types t ON t.id = r.reaction_type_id
";

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, viewer, target), fields(viewer = %viewer, target = %target))]
    async fn find(&self, viewer: &ViewerKey, target: &TargetRef) -> RepoResult<Option<Reaction>> {
        let query = format!(
            "{SELECT_REACTION}
            WHERE r.account_id = $1 AND r.session_token = $2
              AND r.target_type = $3 AND r.target_id = $4"
        );

        let result = sqlx::query_as::<_, ReactionModel>(&query)
            .bind(viewer.account_id())
            .bind(viewer.session_token())
            .bind(&target.target_type)
            .bind(&target.target_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self, viewer, target), fields(viewer = %viewer, target = %target))]
    async fn find_with_type(
        &self,
        viewer: &ViewerKey,
        target: &TargetRef,
        reaction_type: &str,
    ) -> RepoResult<Option<Reaction>> {
        let query = format!(
            "{SELECT_REACTION}
            WHERE r.account_id = $1 AND r.session_token = $2
              AND r.target_type = $3 AND r.target_id = $4
              AND t.name = $5"
        );

        let result = sqlx::query_as::<_, ReactionModel>(&query)
            .bind(viewer.account_id())
            .bind(viewer.session_token())
            .bind(&target.target_type)
            .bind(&target.target_id)
            .bind(reaction_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self, reaction), fields(viewer = %reaction.viewer, target = %reaction.target))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<Reaction> {
        // The SELECT yields no row when the type name is not in the catalog,
        // so nothing is written and fetch_optional returns None.
        let result = sqlx::query_as::<_, ReactionModel>(
            r"
            WITH upserted AS (
                INSERT INTO reactions
                    (id, account_id, session_token, target_type, target_id, reaction_type_id, created_at)
                SELECT $1, $2, $3, $4, $5, t.id, $7
                FROM reaction_types t
                WHERE t.name = $6
                ON CONFLICT ON CONSTRAINT reactions_viewer_target_key
                DO UPDATE SET reaction_type_id = EXCLUDED.reaction_type_id
                RETURNING id, account_id, session_token, target_type, target_id,
                          reaction_type_id, created_at
            )
            SELECT u.id, u.account_id, u.session_token, u.target_type, u.target_id,
                   t.name AS reaction_type, u.created_at
            FROM upserted u
            JOIN reaction_types t ON t.id = u.reaction_type_id
            ",
        )
        .bind(reaction.id.into_inner())
        .bind(reaction.viewer.account_id())
        .bind(reaction.viewer.session_token())
        .bind(&reaction.target.target_type)
        .bind(&reaction.target.target_id)
        .bind(&reaction.reaction_type)
        .bind(reaction.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::TargetNotFound(reaction.target.clone()))
        })?;

        result
            .map(Reaction::from)
            .ok_or_else(|| DomainError::UnknownReactionType(reaction.reaction_type.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, target), fields(target = %target))]
    async fn count_by_type(&self, target: &TargetRef) -> RepoResult<Vec<(String, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r"
            SELECT t.name AS reaction_type, COUNT(*) AS count
            FROM reactions r
            JOIN reaction_types t ON t.id = r.reaction_type_id
            WHERE r.target_type = $1 AND r.target_id = $2
            GROUP BY t.name, t.display_weight
            ORDER BY t.display_weight, t.name
            ",
        )
        .bind(&target.target_type)
        .bind(&target.target_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(|r| (r.reaction_type, r.count)).collect())
    }

    #[instrument(skip(self, target), fields(target = %target))]
    async fn delete_by_target(&self, target: &TargetRef) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM reactions WHERE target_type = $1 AND target_id = $2")
            .bind(&target.target_type)
            .bind(&target.target_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn targets_by_type(&self, reaction_type: &str) -> RepoResult<Vec<TargetRef>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r"
            SELECT DISTINCT r.target_type, r.target_id
            FROM reactions r
            JOIN reaction_types t ON t.id = r.reaction_type_id
            WHERE t.name = $1
            ",
        )
        .bind(reaction_type)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(target_type, target_id)| TargetRef::from_stored(target_type, target_id))
            .collect())
    }

    #[instrument(skip(self))]
    async fn targets_by_account(&self, account_id: Snowflake) -> RepoResult<Vec<TargetRef>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT target_type, target_id FROM reactions WHERE account_id = $1 AND account_id <> 0",
        )
        .bind(account_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(target_type, target_id)| TargetRef::from_stored(target_type, target_id))
            .collect())
    }

    #[instrument(skip(self))]
    async fn delete_by_account(&self, account_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM reactions WHERE account_id = $1 AND account_id <> 0")
            .bind(account_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn reassign_account(&self, account_id: Snowflake) -> RepoResult<u64> {
        let placeholder = SessionToken::placeholder_for(account_id);

        let result = sqlx::query(
            r"
            UPDATE reactions
            SET account_id = 0, session_token = $2
            WHERE account_id = $1 AND account_id <> 0
            ",
        )
        .bind(account_id.into_inner())
        .bind(placeholder.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
