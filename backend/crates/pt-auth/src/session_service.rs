use crate::{AuthError, PasswordHasher, Result as AuthErrorResult, TokenIssuer, TokenPair};

use pt_core::{CredentialStore, Identity, NewIdentity, normalize_email};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};
use uuid::Uuid;

/// Register, login, refresh and token issuance over the identity store.
///
/// Plaintext passwords only ever reach the hasher; the store receives a
/// `PasswordDigest`.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    issuer: Arc<TokenIssuer>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub async fn register(
        &self,
        email: &str,
        name: String,
        password: String,
    ) -> AuthErrorResult<(Identity, TokenPair)> {
        let digest = self.hasher.hash(password).await?;

        let identity = self
            .store
            .create(NewIdentity::local(email, name, digest))
            .await?;

        info!("Registered identity {}", identity.id);

        self.issue_for(identity).await
    }

    /// Unknown email and wrong password fail with different kinds so callers can
    /// log them apart.
    pub async fn login(
        &self,
        email: &str,
        password: String,
    ) -> AuthErrorResult<(Identity, TokenPair)> {
        let email = normalize_email(email);

        let identity = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::IdentityNotFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Federated accounts have no password to check against
        let Some(digest) = identity.password_digest.clone() else {
            warn!("Password login attempted for federated identity {}", identity.id);
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !self.hasher.verify(password, digest).await? {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.issue_for(identity).await
    }

    /// Rotate both tokens. Any verification failure collapses to `Unauthenticated`.
    pub async fn refresh(&self, refresh_token: &str) -> AuthErrorResult<(Identity, TokenPair)> {
        let identity_id = self.issuer.verify_refresh(refresh_token).map_err(|e| {
            warn!("Refresh rejected: {}", e.error_code());
            AuthError::unauthenticated("refresh token rejected")
        })?;

        let identity = self
            .store
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AuthError::unauthenticated("refresh subject no longer exists"))?;

        self.issue_for(identity).await
    }

    /// Issue a fresh pair and record it on the identity
    pub async fn issue_for(&self, mut identity: Identity) -> AuthErrorResult<(Identity, TokenPair)> {
        let pair = self.issuer.issue(identity.id)?;

        identity.record_tokens(pair.access_token.clone(), pair.refresh_token.clone());
        self.store.save(&identity).await?;

        Ok((identity, pair))
    }

    pub async fn change_password(
        &self,
        identity_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AuthErrorResult<()> {
        let mut identity = self
            .store
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AuthError::IdentityNotFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let Some(digest) = identity.password_digest.clone() else {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !self.hasher.verify(current_password, digest).await? {
            return Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let replacement = self.hasher.hash(new_password).await?;
        identity.replace_password(replacement);
        self.store.save(&identity).await?;

        info!("Password changed for identity {}", identity.id);

        Ok(())
    }
}
