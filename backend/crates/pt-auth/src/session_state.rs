use crate::TokenIssuer;

/// Where a client's session stands, judged from the cookies it presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No tokens at all (never logged in, or logged out)
    Anonymous,
    /// Access token verifies
    Authenticated,
    /// Access token gone or expired, refresh token still good
    AccessExpired,
    /// Tokens presented but none usable; a new login is required
    Expired,
}

impl SessionState {
    pub fn observe(
        issuer: &TokenIssuer,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        now: i64,
    ) -> Self {
        if access_token.is_none() && refresh_token.is_none() {
            return Self::Anonymous;
        }

        if let Some(access) = access_token
            && issuer.verify_access_at(access, now).is_ok()
        {
            return Self::Authenticated;
        }

        match refresh_token {
            Some(refresh) if issuer.verify_refresh_at(refresh, now).is_ok() => Self::AccessExpired,
            _ => Self::Expired,
        }
    }

    pub fn can_refresh(&self) -> bool {
        matches!(self, Self::Authenticated | Self::AccessExpired)
    }
}
