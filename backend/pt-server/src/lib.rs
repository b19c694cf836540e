pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod session_cookies;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{
            change_password, login, logout, oauth_callback, oauth_start, refresh_token, register,
        },
        change_password_request::ChangePasswordRequest,
        login_request::LoginRequest,
        oauth_callback_query::OAuthCallbackQuery,
        register_request::RegisterRequest,
    },
    error::{ApiError, FieldError, Result as ApiResult},
    extractors::current_identity::CurrentIdentity,
    message_response::MessageResponse,
    middleware::auth_gate::require_identity,
    notes::{
        create_note_request::CreateNoteRequest,
        note_dto::NoteDto,
        note_list_response::NoteListResponse,
        note_response::NoteResponse,
        notes::{create_note, update_note},
        update_note_request::UpdateNoteRequest,
    },
    problems::{
        create_problem_request::CreateProblemRequest,
        problem_dto::ProblemDto,
        problem_list_response::ProblemListResponse,
        problem_response::ProblemResponse,
        problems::{
            create_problem, daily_problems, delete_problem, get_problem, list_problem_notes,
            list_problems,
        },
    },
};
pub use app_state::AppState;
pub use session_cookies::{ACCESS_COOKIE, REFRESH_COOKIE, SessionCookieManager};

pub use crate::routes::build_router;
