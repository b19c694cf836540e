use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_OAUTH_AUTH_URL, DEFAULT_OAUTH_CALLBACK_PATH,
    DEFAULT_OAUTH_ENABLED, DEFAULT_OAUTH_PUBLIC_BASE_URL, DEFAULT_OAUTH_SUCCESS_REDIRECT,
    DEFAULT_OAUTH_TOKEN_URL, DEFAULT_OAUTH_USERINFO_URL,
};

use std::fmt;

use serde::Deserialize;

/// Federated login client registration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    pub enabled: bool,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Route the provider redirects back to
    pub callback_path: String,
    /// Externally reachable origin, used to build the redirect URL
    pub public_base_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Where the browser lands after a successful callback
    pub success_redirect: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_OAUTH_ENABLED,
            client_id: None,
            client_secret: None,
            callback_path: String::from(DEFAULT_OAUTH_CALLBACK_PATH),
            public_base_url: String::from(DEFAULT_OAUTH_PUBLIC_BASE_URL),
            auth_url: String::from(DEFAULT_OAUTH_AUTH_URL),
            token_url: String::from(DEFAULT_OAUTH_TOKEN_URL),
            userinfo_url: String::from(DEFAULT_OAUTH_USERINFO_URL),
            success_redirect: String::from(DEFAULT_OAUTH_SUCCESS_REDIRECT),
        }
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("enabled", &self.enabled)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("callback_path", &self.callback_path)
            .field("public_base_url", &self.public_base_url)
            .field("success_redirect", &self.success_redirect)
            .finish()
    }
}

impl OAuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        self.credentials()?;

        if !self.callback_path.starts_with('/') {
            return Err(ConfigError::oauth("oauth.callback_path must start with '/'"));
        }

        if !self.success_redirect.starts_with('/') {
            return Err(ConfigError::oauth(
                "oauth.success_redirect must be a local path starting with '/'",
            ));
        }

        for (name, url) in [
            ("public_base_url", &self.public_base_url),
            ("auth_url", &self.auth_url),
            ("token_url", &self.token_url),
            ("userinfo_url", &self.userinfo_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::oauth(format!(
                    "oauth.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        Ok(())
    }

    /// Client id and secret, or an error naming the first one missing
    pub fn credentials(&self) -> ConfigErrorResult<(&str, &str)> {
        let client_id = self
            .client_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::oauth("oauth.client_id is required when enabled"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::oauth("oauth.client_secret is required when enabled"))?;

        Ok((client_id, client_secret))
    }

    /// Absolute callback URL registered with the provider
    pub fn redirect_url(&self) -> String {
        format!(
            "{}{}",
            self.public_base_url.trim_end_matches('/'),
            self.callback_path
        )
    }
}
