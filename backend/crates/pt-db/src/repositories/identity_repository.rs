use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use pt_core::{
    CoreResult, CredentialStore, Identity, NewIdentity, PasswordDigest, TokenSnapshot,
};

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "users";

/// SQLite-backed identity store.
///
/// Email and provider-id uniqueness come from the unique indexes on `users`,
/// so concurrent `create` calls for the same email resolve to one row and a
/// `UniqueViolation` for every loser.
#[derive(Clone)]
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: NewIdentity) -> DbErrorResult<Identity> {
        let identity = Identity::from_new(new);

        let id = identity.id.to_string();
        let password_hash = identity
            .password_digest
            .as_ref()
            .map(|digest| digest.as_str().to_string());
        let created_at = identity.created_at.timestamp();
        let updated_at = identity.updated_at.timestamp();

        sqlx::query(
            r#"
              INSERT INTO users (
                  id, email, name, password_hash, provider_id,
                  access_token, refresh_token, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, NULL, NULL, ?, ?)
              "#,
        )
        .bind(&id)
        .bind(&identity.email)
        .bind(&identity.name)
        .bind(password_hash)
        .bind(&identity.provider_id)
        .bind(created_at)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(identity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Identity>> {
        let id_str = id.to_string();

        let row = sqlx::query(
            r#"
              SELECT id, email, name, password_hash, provider_id,
                     access_token, refresh_token, created_at, updated_at
              FROM users
              WHERE id = ?
              "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(
            r#"
              SELECT id, email, name, password_hash, provider_id,
                     access_token, refresh_token, created_at, updated_at
              FROM users
              WHERE email = ?
              "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    pub async fn find_by_provider_id(&self, provider_id: &str) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(
            r#"
              SELECT id, email, name, password_hash, provider_id,
                     access_token, refresh_token, created_at, updated_at
              FROM users
              WHERE provider_id = ?
              "#,
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    pub async fn update(&self, identity: &Identity) -> DbErrorResult<()> {
        let id = identity.id.to_string();
        let password_hash = identity
            .password_digest
            .as_ref()
            .map(|digest| digest.as_str().to_string());
        let (access_token, refresh_token) = match &identity.tokens {
            Some(snapshot) => (
                Some(snapshot.access_token.clone()),
                Some(snapshot.refresh_token.clone()),
            ),
            None => (None, None),
        };
        let updated_at = identity.updated_at.timestamp();

        sqlx::query(
            r#"
              UPDATE users
              SET name = ?, password_hash = ?, access_token = ?, refresh_token = ?, updated_at = ?
              WHERE id = ?
              "#,
        )
        .bind(&identity.name)
        .bind(password_hash)
        .bind(access_token)
        .bind(refresh_token)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CredentialStore for IdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Identity>> {
        Ok(IdentityRepository::find_by_id(self, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Identity>> {
        Ok(IdentityRepository::find_by_email(self, email).await?)
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> CoreResult<Option<Identity>> {
        Ok(IdentityRepository::find_by_provider_id(self, provider_id).await?)
    }

    async fn create(&self, identity: NewIdentity) -> CoreResult<Identity> {
        Ok(self.insert(identity).await?)
    }

    async fn save(&self, identity: &Identity) -> CoreResult<()> {
        Ok(self.update(identity).await?)
    }
}

fn identity_from_row(row: &SqliteRow) -> DbErrorResult<Identity> {
    let id: String = row.try_get("id")?;
    let password_hash: Option<String> = row.try_get("password_hash")?;
    let access_token: Option<String> = row.try_get("access_token")?;
    let refresh_token: Option<String> = row.try_get("refresh_token")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    let password_digest = password_hash
        .map(PasswordDigest::from_phc)
        .transpose()
        .map_err(|e| DbError::decode(TABLE, e))?;

    let tokens = match (access_token, refresh_token) {
        (Some(access_token), Some(refresh_token)) => Some(TokenSnapshot {
            access_token,
            refresh_token,
        }),
        _ => None,
    };

    Ok(Identity {
        id: parse_uuid(TABLE, &id)?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_digest,
        provider_id: row.try_get("provider_id")?,
        tokens,
        created_at: parse_timestamp(TABLE, created_at)?,
        updated_at: parse_timestamp(TABLE, updated_at)?,
    })
}
