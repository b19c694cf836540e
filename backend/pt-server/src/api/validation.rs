//! Field checks shared by the request structs. Each check pushes onto a list so
//! one response reports every bad field.

use crate::{ApiError, ApiResult, FieldError};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_TEXT_LENGTH: usize = 10_000;

pub fn require_non_blank(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    }
}

pub fn max_chars(errors: &mut Vec<FieldError>, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
}

pub fn password(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    let length = value.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    } else if length > MAX_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", MAX_PASSWORD_LENGTH),
        ));
    }
}

/// `local@domain.tld`, no whitespace
pub fn email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if !is_email(value.trim()) {
        errors.push(FieldError::new(field, "must be a valid email address"));
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

/// Err with every collected field error, Ok when there are none
#[track_caller]
pub fn finish(errors: Vec<FieldError>) -> ApiResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}
