use std::fmt;

/// Last token pair issued to an identity.
///
/// Informational only: authorization is always decided from the signature and
/// expiry of the token presented, never from this copy.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSnapshot")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
