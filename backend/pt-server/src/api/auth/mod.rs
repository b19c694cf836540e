#[allow(clippy::module_inception)]
pub mod auth;
pub mod change_password_request;
pub mod login_request;
pub mod oauth_callback_query;
pub mod register_request;
