use crate::session_cookies::{ACCESS_COOKIE, SessionCookieManager};
use crate::{ApiError, AppState, CurrentIdentity};

use pt_auth::select_token;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Runs ahead of every protected route.
///
/// The `accessToken` cookie wins over an `Authorization: Bearer` header. Any
/// failure answers 401 without calling the inner service.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let cookie = SessionCookieManager::read_cookie(headers, ACCESS_COOKIE);
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = select_token(cookie.as_deref(), authorization);

    match state.gate.authorize(token).await {
        Ok(identity) => {
            request.extensions_mut().insert(CurrentIdentity(identity));
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
