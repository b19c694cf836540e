use pt_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {source} {location}")]
    Migration {
        source: sqlx::migrate::MigrateError,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on {field} {location}")]
    UniqueViolation {
        field: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row in {table}: {message} {location}")]
    Decode {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub(crate) fn decode<E: std::fmt::Display>(table: &'static str, error: E) -> Self {
        Self::Decode {
            table,
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        // UNIQUE failures are surfaced as their own variant so callers can
        // report a conflict instead of a generic storage failure
        if let sqlx::Error::Database(db_error) = &source
            && db_error.is_unique_violation()
        {
            return Self::UniqueViolation {
                field: unique_violation_field(db_error.message()),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    #[track_caller]
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for CoreError {
    #[track_caller]
    fn from(error: DbError) -> Self {
        match error {
            DbError::UniqueViolation { field, .. } => CoreError::conflict(field),
            other => CoreError::store(other.to_string()),
        }
    }
}

/// SQLite reports "UNIQUE constraint failed: users.email"; keep the column name
fn unique_violation_field(message: &str) -> String {
    message
        .rsplit(": ")
        .next()
        .and_then(|qualified| qualified.split(", ").next())
        .map(|column| column.rsplit('.').next().unwrap_or(column))
        .unwrap_or("unknown")
        .to_string()
}

pub type Result<T> = std::result::Result<T, DbError>;
