use crate::{ApiResult, FieldError};
use crate::api::validation;

use pt_core::Difficulty;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// "easy", "medium" or "hard", any case
    pub difficulty: String,

    /// Computed by the client's review schedule
    pub next_review_date: DateTime<Utc>,

    /// Defaults to now
    #[serde(default)]
    pub solved_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub times_solved: Option<u32>,
}

impl CreateProblemRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();

        validation::require_non_blank(&mut errors, "title", &self.title);
        validation::max_chars(&mut errors, "title", &self.title, validation::MAX_TITLE_LENGTH);
        validation::require_non_blank(&mut errors, "description", &self.description);
        validation::max_chars(
            &mut errors,
            "description",
            &self.description,
            validation::MAX_TEXT_LENGTH,
        );

        if Difficulty::from_str(&self.difficulty).is_err() {
            errors.push(FieldError::new(
                "difficulty",
                "must be one of easy, medium, hard",
            ));
        }

        validation::finish(errors)
    }
}
