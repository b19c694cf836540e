//! REST API error types
//!
//! Every failure leaves the server as `{"error": {code, message, field?, details?}}`.
//! Internal detail (sqlx messages, provider errors, locations) is logged and
//! never serialized.

use pt_auth::AuthError;
use pt_core::CoreError;
use pt_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

const UNAUTHENTICATED_MESSAGE: &str = "Authentication required";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
        location: ErrorLocation,
    },

    /// Rejected request with a specific code, e.g. USER_NOT_FOUND (400)
    #[error("Bad request [{code}]: {message} {location}")]
    BadRequest {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Missing, invalid or expired credentials (401). The body never says which.
    #[error("Unauthenticated {location}")]
    Unauthenticated { location: ErrorLocation },

    /// Unique field already taken (400)
    #[error("Conflict: {field} already exists {location}")]
    Conflict {
        field: String,
        location: ErrorLocation,
    },

    /// Unknown id, or owned by someone else (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Persistence or provider failure (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation(details: Vec<FieldError>) -> Self {
        let message = details
            .iter()
            .map(|detail| format!("{}: {}", detail.field, detail.message))
            .collect::<Vec<_>>()
            .join("; ");

        Self::Validation {
            message,
            details,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(code: &'static str, message: S) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } | Self::Conflict { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let body = match self {
            ApiError::Validation {
                message, details, ..
            } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field: details.first().map(|detail| detail.field.clone()),
                details: Some(details),
            },
            ApiError::BadRequest { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
                field: None,
                details: None,
            },
            ApiError::Unauthenticated { .. } => ApiErrorBody {
                code: "UNAUTHENTICATED".into(),
                message: UNAUTHENTICATED_MESSAGE.into(),
                field: None,
                details: None,
            },
            ApiError::Conflict { field, .. } => ApiErrorBody {
                code: "CONFLICT".into(),
                message: format!("{} is already in use", field),
                field: Some(field),
                details: None,
            },
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
                details: None,
            },
            ApiError::Internal { .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message: INTERNAL_MESSAGE.into(),
                field: None,
                details: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            AuthError::IdentityNotFound { .. } => ApiError::BadRequest {
                code: "USER_NOT_FOUND",
                message: "No account exists for this email".into(),
                location,
            },
            AuthError::InvalidCredentials { .. } => ApiError::BadRequest {
                code: "INVALID_CREDENTIALS",
                message: "Incorrect password".into(),
                location,
            },
            AuthError::Conflict { field, .. } => ApiError::Conflict { field, location },
            AuthError::Unauthenticated { reason, .. } => {
                log::warn!("Unauthenticated: {}", reason);
                ApiError::Unauthenticated { location }
            }
            AuthError::InvalidToken { .. }
            | AuthError::TokenExpired { .. }
            | AuthError::InvalidClaim { .. } => {
                log::warn!("Token rejected: {}", e.error_code());
                ApiError::Unauthenticated { location }
            }
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            DbError::UniqueViolation { field, .. } => ApiError::Conflict { field, location },
            other => ApiError::Internal {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidDifficulty { value, .. } => ApiError::validation(vec![
                FieldError::new("difficulty", format!("'{}' is not easy, medium or hard", value)),
            ]),
            CoreError::Conflict { field, .. } => ApiError::Conflict {
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::validation(vec![FieldError::new("id", format!("Invalid UUID format: {}", e))])
    }
}

/// Unparseable or mistyped JSON bodies are validation failures
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
