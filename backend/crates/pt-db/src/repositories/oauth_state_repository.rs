use crate::Result as DbErrorResult;

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

/// Pending authorization requests (CSRF state -> PKCE verifier)
pub struct OAuthStateRepository {
    pool: SqlitePool,
}

impl OAuthStateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, state: &str, pkce_verifier: &str, ttl: Duration) -> DbErrorResult<()> {
        let expires_at = (Utc::now() + ttl).timestamp();

        sqlx::query(
            r#"
              INSERT INTO oauth_states (state, pkce_verifier, expires_at)
              VALUES (?, ?, ?)
              "#,
        )
        .bind(state)
        .bind(pkce_verifier)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete the state and return its verifier in one statement.
    ///
    /// A state can be consumed once; expired rows are removed without being
    /// returned.
    pub async fn consume(&self, state: &str) -> DbErrorResult<Option<String>> {
        let now = Utc::now().timestamp();

        let row: Option<(String, i64)> = sqlx::query_as(
            r#"
              DELETE FROM oauth_states
              WHERE state = ?
              RETURNING pkce_verifier, expires_at
              "#,
        )
        .bind(state)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row
            .filter(|(_, expires_at)| *expires_at >= now)
            .map(|(verifier, _)| verifier))
    }

    pub async fn purge_expired(&self) -> DbErrorResult<u64> {
        let now = Utc::now().timestamp();

        let result = sqlx::query("DELETE FROM oauth_states WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
