//! Session cookie handling.
//!
//! Both tokens travel as `HttpOnly; Secure; SameSite=Strict; Path=/` cookies.
//! Set and clear build from the same template so a removal cookie always
//! matches the attributes the browser stored.

use crate::{ApiError, ApiResult};

use pt_auth::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS, TokenPair};

use cookie::time::{Duration as CookieDuration, OffsetDateTime};
use cookie::{Cookie, SameSite};
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

const COOKIE_PATH: &str = "/";

#[derive(Debug, Clone)]
pub struct SessionCookieManager {
    access_max_age: i64,
    refresh_max_age: i64,
}

impl Default for SessionCookieManager {
    fn default() -> Self {
        Self {
            access_max_age: ACCESS_TOKEN_TTL_SECS,
            refresh_max_age: REFRESH_TOKEN_TTL_SECS,
        }
    }
}

impl SessionCookieManager {
    pub fn set_auth_cookies(&self, headers: &mut HeaderMap, tokens: &TokenPair) -> ApiResult<()> {
        append(
            headers,
            template(ACCESS_COOKIE, tokens.access_token.clone())
                .max_age(CookieDuration::seconds(self.access_max_age))
                .build(),
        )?;
        append(
            headers,
            template(REFRESH_COOKIE, tokens.refresh_token.clone())
                .max_age(CookieDuration::seconds(self.refresh_max_age))
                .build(),
        )
    }

    pub fn clear_auth_cookies(&self, headers: &mut HeaderMap) -> ApiResult<()> {
        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            append(
                headers,
                template(name, String::new())
                    .max_age(CookieDuration::ZERO)
                    .expires(OffsetDateTime::UNIX_EPOCH)
                    .build(),
            )?;
        }
        Ok(())
    }

    /// Value of the named cookie from the request `Cookie` header(s)
    pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

fn template(name: &'static str, value: String) -> cookie::CookieBuilder<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path(COOKIE_PATH)
}

fn append(headers: &mut HeaderMap, cookie: Cookie<'static>) -> ApiResult<()> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ApiError::internal(format!("Unencodable cookie {}: {}", cookie.name(), e)))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}
