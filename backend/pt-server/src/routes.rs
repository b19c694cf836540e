use crate::{
    AppState, change_password, create_note, create_problem, daily_problems, delete_problem,
    get_problem, health, list_problem_notes, list_problems, login, logout, oauth_callback,
    oauth_start, refresh_token, register, require_identity, update_note,
};

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
///
/// `oauth_callback_path` must match the redirect URL registered with the
/// provider.
pub fn build_router(state: AppState, oauth_callback_path: &str) -> Router {
    let auth = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", get(refresh_token))
        .route("/logout", get(logout))
        .route("/oauth/start", get(oauth_start));

    // Every route here runs behind the gate
    let protected = Router::new()
        .route("/problems", get(list_problems).post(create_problem))
        .route("/problems/daily", get(daily_problems))
        .route("/problems/{id}", get(get_problem).delete(delete_problem))
        .route("/problems/{id}/notes", get(list_problem_notes))
        .route("/notes", post(create_note))
        .route("/notes/{id}", put(update_note))
        .route("/auth/password", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/auth", auth)
        .route(oauth_callback_path, get(oauth_callback))
        .nest("/api", protected)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
