//! Repository for the `resume_stashes` table.
//!
//! The stash is a single-slot, single-consumption mailbox: consumption is
//! a `DELETE ... RETURNING`, so of two racing consumers exactly one gets
//! the row and a consumed token can never be replayed.

use mentorhub_core::types::Timestamp;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::stash::ResumeStash;

/// Column list for `resume_stashes` queries.
const COLUMNS: &str = "id, token, action, return_to, expires_at, created_at";

/// Provides stash/consume operations for resume actions.
pub struct StashRepo;

impl StashRepo {
    /// Store a resume action under a fresh token.
    pub async fn create(
        pool: &PgPool,
        token: Uuid,
        action: &serde_json::Value,
        return_to: &str,
        expires_at: Timestamp,
    ) -> Result<ResumeStash, sqlx::Error> {
        let query = format!(
            "INSERT INTO resume_stashes (token, action, return_to, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResumeStash>(&query)
            .bind(token)
            .bind(action)
            .bind(return_to)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Destructively consume a stash by token.
    ///
    /// Returns the row exactly once; repeated calls (and expired tokens)
    /// return `None`.
    pub async fn consume(pool: &PgPool, token: Uuid) -> Result<Option<ResumeStash>, sqlx::Error> {
        let query = format!(
            "DELETE FROM resume_stashes \
             WHERE token = $1 AND expires_at > NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResumeStash>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Delete stashes whose expiry has passed.
    ///
    /// Returns the number of rows removed. Called periodically by the
    /// retention task.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resume_stashes WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
