use crate::{ApiError, FieldError};

use pt_auth::AuthError;
use pt_core::CoreError;
use pt_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::assert_that;
use googletest::prelude::eq;
use http::StatusCode;
use http_body_util::BodyExt;

async fn into_parts(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_every_field() {
    // Given
    let error = ApiError::validation(vec![
        FieldError::new("email", "must be a valid email address"),
        FieldError::new("password", "must be at least 6 characters"),
    ]);

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "email");
    assert_eq!(json["error"]["details"][1]["field"], "password");
}

#[tokio::test]
async fn given_unknown_email_when_converted_then_400_user_not_found() {
    // Given
    let error = ApiError::from(AuthError::IdentityNotFound {
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["error"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn given_wrong_password_when_converted_then_400_invalid_credentials() {
    // Given
    let error = ApiError::from(AuthError::InvalidCredentials {
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn given_duplicate_email_when_converted_then_400_conflict_naming_field() {
    // Given
    let error = ApiError::from(AuthError::Conflict {
        field: "email".to_string(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn given_expired_and_malformed_tokens_when_converted_then_identical_401_bodies() {
    // Given
    let expired = ApiError::from(AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    });
    let malformed = ApiError::from(AuthError::invalid_token("not a jwt"));
    let missing = ApiError::from(AuthError::unauthenticated("missing token"));

    // When
    let (expired_status, expired_json) = into_parts(expired).await;
    let (malformed_status, malformed_json) = into_parts(malformed).await;
    let (missing_status, missing_json) = into_parts(missing).await;

    // Then
    assert_that!(expired_status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(malformed_status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(missing_status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(expired_json, eq(&malformed_json));
    assert_that!(missing_json, eq(&malformed_json));
}

#[tokio::test]
async fn given_store_failure_when_converted_then_500_with_generic_message() {
    // Given
    let error = ApiError::from(DbError::Initialization {
        message: "disk /var/lib/secret.db is full".to_string(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("secret.db"));
}

#[tokio::test]
async fn given_gate_store_failure_when_converted_then_500_not_401() {
    // Given
    let error = ApiError::from(AuthError::from(CoreError::store("database is locked")));

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(json["error"]["message"], "Internal server error");
    assert!(!json.to_string().contains("locked"));
}

#[tokio::test]
async fn given_unique_violation_when_converted_then_conflict() {
    // Given
    let error = ApiError::from(DbError::UniqueViolation {
        field: "email".to_string(),
        location: ErrorLocation::from(Location::caller()),
    });

    // When
    let (status, json) = into_parts(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_eq!(json["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn given_missing_resource_when_rendered_then_404() {
    // When
    let (status, json) = into_parts(ApiError::not_found("Problem x not found")).await;

    // Then
    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Problem x not found");
}
