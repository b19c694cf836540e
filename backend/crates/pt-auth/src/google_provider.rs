//! Google OAuth 2.0 authorization-code flow with PKCE.
//!
//! The provider only builds the authorization redirect and exchanges a callback
//! code for a profile. Persisting the CSRF state and mapping the profile onto a
//! local identity happen elsewhere.

use crate::{AuthError, AuthorizationRequest, IdentityProvider, Result as AuthErrorResult};

use pt_core::ProviderProfile;

use async_trait::async_trait;
use log::{debug, warn};
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

const SCOPES: [&str; 3] = ["openid", "email", "profile"];

/// Endpoints and credentials for one OAuth client registration
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Absolute URL of the callback route
    pub redirect_url: String,
}

/// Userinfo response (`/oauth2/v2/userinfo`)
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: String,
    #[serde(default)]
    verified_email: Option<bool>,
    #[serde(default)]
    name: Option<String>,
}

type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

pub struct GoogleProvider {
    client: ConfiguredClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleProvider {
    pub fn new(settings: ProviderSettings) -> AuthErrorResult<Self> {
        let auth_url = AuthUrl::new(settings.auth_url)
            .map_err(|e| AuthError::provider(format!("Invalid auth URL: {}", e)))?;
        let token_url = TokenUrl::new(settings.token_url)
            .map_err(|e| AuthError::provider(format!("Invalid token URL: {}", e)))?;
        let redirect_url = RedirectUrl::new(settings.redirect_url)
            .map_err(|e| AuthError::provider(format!("Invalid redirect URL: {}", e)))?;

        let client = BasicClient::new(ClientId::new(settings.client_id))
            .set_client_secret(ClientSecret::new(settings.client_secret))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);

        // Redirects from the token endpoint are not followed
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            http,
            userinfo_url: settings.userinfo_url,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (url, csrf_state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(SCOPES.iter().map(|scope| Scope::new(scope.to_string())))
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: url.to_string(),
            state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    async fn exchange(&self, code: &str, pkce_verifier: &str) -> AuthErrorResult<ProviderProfile> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| AuthError::provider(format!("Token exchange failed: {}", e)))?;

        debug!("Token exchange succeeded, fetching userinfo");

        let user: GoogleUser = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AuthError::provider(format!("Userinfo request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AuthError::provider(format!("Userinfo response malformed: {}", e)))?;

        if user.verified_email == Some(false) {
            warn!("Provider returned an unverified email");
            return Err(AuthError::provider("email not verified by provider"));
        }

        let display_name = user
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.email.clone());

        Ok(ProviderProfile {
            provider_id: user.id,
            email: user.email,
            display_name,
        })
    }
}
