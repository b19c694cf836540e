use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A uniqueness constraint rejected the write (`field` is the offending column)
    #[error("Conflict: {field} already exists {location}")]
    Conflict {
        field: String,
        location: ErrorLocation,
    },

    #[error("Invalid difficulty: {value} {location}")]
    InvalidDifficulty {
        value: String,
        location: ErrorLocation,
    },

    #[error("Password digest is not a PHC-formatted hash {location}")]
    InvalidPasswordDigest { location: ErrorLocation },

    #[error("Identity store failure: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    #[track_caller]
    pub fn conflict<S: Into<String>>(field: S) -> Self {
        Self::Conflict {
            field: field.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<uuid::Error> for CoreError {
    #[track_caller]
    fn from(source: uuid::Error) -> Self {
        Self::Uuid {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type CoreResult<T> = StdResult<T, CoreError>;
