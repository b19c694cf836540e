use crate::ApiResult;
use crate::api::validation;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();

        validation::email(&mut errors, "email", &self.email);
        validation::require_non_blank(&mut errors, "password", &self.password);

        validation::finish(errors)
    }
}
