//! Identity entity - the account that owns problems and notes.

use crate::{NewIdentity, PasswordDigest, TokenSnapshot};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted account.
///
/// Problems and notes reference their owner through `user_id`; the identity
/// itself holds no collection of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    /// Unique across local and federated accounts
    pub email: String,
    pub name: String,
    /// Present only for accounts registered with a password
    pub password_digest: Option<PasswordDigest>,
    /// Present only for accounts created through federation
    pub provider_id: Option<String>,
    pub tokens: Option<TokenSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Materialize a new record with a fresh id and timestamps
    pub fn from_new(new: NewIdentity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: new.email,
            name: new.name,
            password_digest: new.password_digest,
            provider_id: new.provider_id,
            tokens: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_local(&self) -> bool {
        self.password_digest.is_some()
    }

    pub fn is_federated(&self) -> bool {
        self.provider_id.is_some()
    }

    /// Overwrite the token snapshot (last write wins)
    pub fn record_tokens(&mut self, access_token: String, refresh_token: String) {
        self.tokens = Some(TokenSnapshot {
            access_token,
            refresh_token,
        });
        self.updated_at = Utc::now();
    }

    pub fn replace_password(&mut self, digest: PasswordDigest) {
        self.password_digest = Some(digest);
        self.updated_at = Utc::now();
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
