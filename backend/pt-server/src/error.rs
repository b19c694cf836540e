use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Startup failures. Request-time failures are `ApiError`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] pt_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] pt_db::DbError),

    #[error("Auth setup failed: {0}")]
    Auth(#[from] pt_auth::AuthError),

    #[error("I/O error on {path}: {source} {location}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl ServerError {
    #[track_caller]
    pub fn io<S: Into<String>>(path: S, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
