use crate::ApiResult;
use crate::api::validation;

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub problem_id: Uuid,
    pub content: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();

        validation::require_non_blank(&mut errors, "content", &self.content);
        validation::max_chars(&mut errors, "content", &self.content, validation::MAX_TEXT_LENGTH);

        validation::finish(errors)
    }
}
