use crate::{AuthError, Result as AuthErrorResult, TokenIssuer};

use pt_core::{CredentialStore, Identity};

use std::sync::Arc;

use log::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Decides whether a presented access token maps to a live identity.
///
/// Every token or identity failure is reported as `Unauthenticated`; the
/// underlying reason is only logged. Store failures propagate as `Store`.
#[derive(Clone)]
pub struct AuthGate {
    issuer: Arc<TokenIssuer>,
    store: Arc<dyn CredentialStore>,
}

impl AuthGate {
    pub fn new(issuer: Arc<TokenIssuer>, store: Arc<dyn CredentialStore>) -> Self {
        Self { issuer, store }
    }

    pub async fn authorize(&self, token: Option<&str>) -> AuthErrorResult<Identity> {
        let Some(token) = token else {
            debug!("Gate rejected request: no token");
            return Err(AuthError::unauthenticated("missing token"));
        };

        let identity_id = self.issuer.verify_access(token).map_err(|e| {
            warn!("Gate rejected request: {}", e.error_code());
            AuthError::unauthenticated("access token rejected")
        })?;

        match self.store.find_by_id(identity_id).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => {
                warn!("Gate rejected request: identity {} not found", identity_id);
                Err(AuthError::unauthenticated("identity not found"))
            }
            Err(e) => {
                warn!("Gate could not load identity {}: {}", identity_id, e);
                Err(e.into())
            }
        }
    }
}

/// The cookie wins when both carriers are present. Empty values count as absent.
pub fn select_token<'a>(cookie: Option<&'a str>, authorization: Option<&'a str>) -> Option<&'a str> {
    cookie
        .filter(|value| !value.is_empty())
        .or_else(|| authorization.and_then(parse_bearer))
}

/// Extract the token from an `Authorization: Bearer <token>` value
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
