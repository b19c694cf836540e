//! Session REST API handlers
//!
//! Tokens only ever travel in cookies; response bodies carry a message.

use crate::app_state::OAUTH_STATE_TTL_MINUTES;
use crate::session_cookies::{ACCESS_COOKIE, REFRESH_COOKIE, SessionCookieManager};
use crate::{
    ApiError, ApiResult, AppState, ChangePasswordRequest, CurrentIdentity, LoginRequest,
    MessageResponse, OAuthCallbackQuery, RegisterRequest,
};

use pt_auth::SessionState;
use pt_db::OAuthStateRepository;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::HeaderMap,
    response::Redirect,
};
use chrono::{Duration, Utc};
use log::{info, warn};

// =============================================================================
// Local accounts
// =============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let (identity, tokens) = state
        .sessions
        .register(&req.email, req.name.trim().to_string(), req.password)
        .await
        .inspect_err(|e| warn!("Registration failed: {}", e.error_code()))?;

    let mut headers = HeaderMap::new();
    state.cookies.set_auth_cookies(&mut headers, &tokens)?;

    info!("Identity {} registered and signed in", identity.id);

    Ok((headers, Json(MessageResponse::new("Registration successful"))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let (identity, tokens) = state
        .sessions
        .login(&req.email, req.password)
        .await
        .inspect_err(|e| warn!("Login failed: {}", e.error_code()))?;

    let mut headers = HeaderMap::new();
    state.cookies.set_auth_cookies(&mut headers, &tokens)?;

    info!("Identity {} logged in", identity.id);

    Ok((headers, Json(MessageResponse::new("Login successful"))))
}

/// PUT /api/auth/password
///
/// Requires the current password; federated identities have none and are
/// rejected. Issued tokens stay valid.
pub async fn change_password(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    state
        .sessions
        .change_password(identity.id, req.current_password, req.new_password)
        .await
        .inspect_err(|e| warn!("Password change failed for {}: {}", identity.id, e.error_code()))?;

    Ok(Json(MessageResponse::new("Password changed")))
}

/// GET /api/auth/refresh-token
///
/// Rotates both tokens. A missing or rejected refresh cookie is a 401 with no
/// cookies set.
pub async fn refresh_token(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let access = SessionCookieManager::read_cookie(&request_headers, ACCESS_COOKIE);
    let refresh = SessionCookieManager::read_cookie(&request_headers, REFRESH_COOKIE);

    let session = SessionState::observe(
        state.sessions.issuer(),
        access.as_deref(),
        refresh.as_deref(),
        Utc::now().timestamp(),
    );

    let token = match refresh {
        Some(token) if session.can_refresh() => token,
        _ => {
            warn!("Refresh rejected: session is {:?}", session);
            return Err(ApiError::unauthenticated());
        }
    };

    let (identity, tokens) = state.sessions.refresh(&token).await?;

    let mut headers = HeaderMap::new();
    state.cookies.set_auth_cookies(&mut headers, &tokens)?;

    info!("Tokens refreshed for identity {}", identity.id);

    Ok((headers, Json(MessageResponse::new("Token refreshed"))))
}

/// GET /api/auth/logout
///
/// Clears the cookies only. Already-issued tokens stay valid until they expire.
pub async fn logout(
    State(state): State<AppState>,
) -> ApiResult<(HeaderMap, Json<MessageResponse>)> {
    let mut headers = HeaderMap::new();
    state.cookies.clear_auth_cookies(&mut headers)?;

    Ok((headers, Json(MessageResponse::new("Logged out"))))
}

// =============================================================================
// OAuth
// =============================================================================

/// GET /api/auth/oauth/start
///
/// Persists the CSRF state and PKCE verifier, then sends the browser to the
/// provider.
pub async fn oauth_start(State(state): State<AppState>) -> ApiResult<Redirect> {
    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| ApiError::not_found("OAuth sign-in is not enabled"))?;

    let request = provider.authorization_request();

    OAuthStateRepository::new(state.pool.clone())
        .create(
            &request.state,
            &request.pkce_verifier,
            Duration::minutes(OAUTH_STATE_TTL_MINUTES),
        )
        .await?;

    info!("Starting {} sign-in", provider.name());

    Ok(Redirect::to(&request.url))
}

/// GET <oauth.callback_path>
///
/// Every failure aborts before tokens are issued, so no cookies are set.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<(HeaderMap, Redirect)> {
    let provider = state
        .provider
        .as_ref()
        .ok_or_else(|| ApiError::not_found("OAuth sign-in is not enabled"))?;

    if let Some(error) = query.error {
        warn!("{} sign-in declined: {}", provider.name(), error);
        return Err(ApiError::bad_request(
            "OAUTH_DENIED",
            "Sign-in was cancelled at the provider",
        ));
    }

    let (Some(code), Some(csrf_state)) = (query.code, query.state) else {
        return Err(ApiError::bad_request(
            "INVALID_OAUTH_STATE",
            "Missing code or state",
        ));
    };

    let pkce_verifier = OAuthStateRepository::new(state.pool.clone())
        .consume(&csrf_state)
        .await?
        .ok_or_else(|| {
            warn!("OAuth callback with unknown or expired state");
            ApiError::bad_request("INVALID_OAUTH_STATE", "Sign-in request expired or unknown")
        })?;

    let profile = provider.exchange(&code, &pkce_verifier).await?;
    let identity = state.federator.resolve(&profile).await?;
    let (identity, tokens) = state.sessions.issue_for(identity).await?;

    let mut headers = HeaderMap::new();
    state.cookies.set_auth_cookies(&mut headers, &tokens)?;

    info!(
        "Identity {} signed in via {}",
        identity.id,
        provider.name()
    );

    Ok((headers, Redirect::to(&state.success_redirect)))
}
