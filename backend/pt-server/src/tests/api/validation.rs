use crate::{ApiError, CreateProblemRequest, LoginRequest, RegisterRequest};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};

fn field_names(error: ApiError) -> Vec<String> {
    match error {
        ApiError::Validation { details, .. } => {
            details.into_iter().map(|detail| detail.field).collect()
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn given_valid_registration_when_validated_then_ok() {
    // Given
    let req = RegisterRequest {
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        password: "secret1".to_string(),
    };

    // When / Then
    assert_that!(req.validate(), ok(anything()));
}

#[test]
fn given_every_field_invalid_when_validated_then_every_field_reported() {
    // Given
    let req = RegisterRequest {
        email: "not-an-email".to_string(),
        name: "   ".to_string(),
        password: "12345".to_string(),
    };

    // When
    let fields = field_names(req.validate().unwrap_err());

    // Then
    assert_that!(fields, eq(&vec!["email".to_string(), "name".to_string(), "password".to_string()]));
}

#[test]
fn given_six_character_password_when_validated_then_ok() {
    // Given
    let req = RegisterRequest {
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        password: "123456".to_string(),
    };

    // When / Then
    assert_that!(req.validate(), ok(anything()));
}

#[test]
fn given_login_without_password_when_validated_then_password_reported() {
    // Given
    let req = LoginRequest {
        email: "ada@example.com".to_string(),
        password: String::new(),
    };

    // When
    let fields = field_names(req.validate().unwrap_err());

    // Then
    assert_that!(fields, eq(&vec!["password".to_string()]));
}

#[test]
fn given_unknown_difficulty_when_validated_then_difficulty_reported() {
    // Given
    let req = CreateProblemRequest {
        title: "Two Sum".to_string(),
        description: "Hash map lookup".to_string(),
        difficulty: "extreme".to_string(),
        next_review_date: chrono::Utc::now(),
        solved_at: None,
        times_solved: None,
    };

    // When
    let fields = field_names(req.validate().unwrap_err());

    // Then
    assert_that!(fields, eq(&vec!["difficulty".to_string()]));
}

#[test]
fn given_blank_description_when_validated_then_description_reported() {
    // Given
    let req = CreateProblemRequest {
        title: "Two Sum".to_string(),
        description: "   ".to_string(),
        difficulty: "Easy".to_string(),
        next_review_date: chrono::Utc::now(),
        solved_at: None,
        times_solved: None,
    };

    // When
    let fields = field_names(req.validate().unwrap_err());

    // Then
    assert_that!(fields, eq(&vec!["description".to_string()]));
}
