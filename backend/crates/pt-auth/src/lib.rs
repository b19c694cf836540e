pub mod auth_gate;
pub mod claims;
pub mod error;
pub mod federator;
pub mod google_provider;
pub mod identity_provider;
pub mod password_hasher;
pub mod session_service;
pub mod session_state;
pub mod token_issuer;
pub mod token_kind;
pub mod token_pair;

pub use auth_gate::{AuthGate, parse_bearer, select_token};
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use federator::OAuthFederator;
pub use google_provider::{GoogleProvider, ProviderSettings};
pub use identity_provider::{AuthorizationRequest, IdentityProvider};
pub use password_hasher::PasswordHasher;
pub use session_service::SessionService;
pub use session_state::SessionState;
pub use token_issuer::TokenIssuer;
pub use token_kind::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS, TokenKind};
pub use token_pair::TokenPair;

#[cfg(test)]
mod tests;
