use crate::session_cookies::SessionCookieManager;

use pt_auth::{
    AuthGate, IdentityProvider, OAuthFederator, PasswordHasher, SessionService, TokenIssuer,
};
use pt_core::CredentialStore;
use pt_db::IdentityRepository;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Lifetime of a pending OAuth authorization request
pub const OAUTH_STATE_TTL_MINUTES: i64 = 10;

/// Shared per-request state. Everything here is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: SessionService,
    pub federator: OAuthFederator,
    pub gate: AuthGate,
    /// `None` when OAuth sign-in is disabled
    pub provider: Option<Arc<dyn IdentityProvider>>,
    pub cookies: SessionCookieManager,
    /// Where the browser lands after a successful OAuth callback
    pub success_redirect: String,
}

impl AppState {
    /// Wire every auth component to one SQLite-backed identity store
    pub fn new(
        pool: SqlitePool,
        issuer: Arc<TokenIssuer>,
        hasher: PasswordHasher,
        provider: Option<Arc<dyn IdentityProvider>>,
        success_redirect: String,
    ) -> Self {
        let store: Arc<dyn CredentialStore> = Arc::new(IdentityRepository::new(pool.clone()));

        Self {
            sessions: SessionService::new(store.clone(), hasher, issuer.clone()),
            federator: OAuthFederator::new(store.clone()),
            gate: AuthGate::new(issuer, store),
            pool,
            provider,
            cookies: SessionCookieManager::default(),
            success_redirect,
        }
    }
}
