use crate::{AuthError, Claims, Result as AuthErrorResult, TokenKind, TokenPair};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Mints and verifies HS256 access/refresh tokens.
///
/// Expiry is checked here rather than by `jsonwebtoken` so the bound is exact:
/// a token is valid while `now <= exp`, with no leeway.
#[derive(Clone)]
pub struct TokenIssuer {
    access: SigningKeys,
    refresh: SigningKeys,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            access: SigningKeys::from_secret(access_secret),
            refresh: SigningKeys::from_secret(refresh_secret),
            validation,
        }
    }

    pub fn issue(&self, identity_id: Uuid) -> AuthErrorResult<TokenPair> {
        self.issue_at(identity_id, Utc::now().timestamp())
    }

    pub fn issue_at(&self, identity_id: Uuid, now: i64) -> AuthErrorResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(TokenKind::Access, identity_id, now)?,
            refresh_token: self.sign(TokenKind::Refresh, identity_id, now)?,
        })
    }

    pub fn verify_access(&self, token: &str) -> AuthErrorResult<Uuid> {
        self.verify_at(TokenKind::Access, token, Utc::now().timestamp())
    }

    pub fn verify_refresh(&self, token: &str) -> AuthErrorResult<Uuid> {
        self.verify_at(TokenKind::Refresh, token, Utc::now().timestamp())
    }

    pub fn verify_access_at(&self, token: &str, now: i64) -> AuthErrorResult<Uuid> {
        self.verify_at(TokenKind::Access, token, now)
    }

    pub fn verify_refresh_at(&self, token: &str, now: i64) -> AuthErrorResult<Uuid> {
        self.verify_at(TokenKind::Refresh, token, now)
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    #[track_caller]
    fn sign(&self, kind: TokenKind, identity_id: Uuid, now: i64) -> AuthErrorResult<String> {
        let claims = Claims::new(identity_id, now, kind.ttl_secs());

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(kind).encoding,
        )
        .map_err(|e| AuthError::TokenEncode {
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn verify_at(&self, kind: TokenKind, token: &str, now: i64) -> AuthErrorResult<Uuid> {
        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| AuthError::InvalidToken {
                message: format!("{} token rejected: {}", kind.as_str(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let claims = token_data.claims;
        claims.validate()?;

        if now > claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        claims.subject()
    }
}
