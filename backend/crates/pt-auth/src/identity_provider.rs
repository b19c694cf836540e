use crate::Result as AuthErrorResult;

use pt_core::ProviderProfile;

use async_trait::async_trait;

/// Everything the start route needs: where to send the browser, plus the CSRF
/// state and PKCE verifier to persist until the callback.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub pkce_verifier: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn authorization_request(&self) -> AuthorizationRequest;

    /// Trade a callback code for the provider's verified profile
    async fn exchange(&self, code: &str, pkce_verifier: &str) -> AuthErrorResult<ProviderProfile>;
}
