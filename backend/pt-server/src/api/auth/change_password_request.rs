use crate::ApiResult;
use crate::api::validation;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();

        validation::require_non_blank(&mut errors, "current_password", &self.current_password);
        validation::password(&mut errors, "new_password", &self.new_password);

        validation::finish(errors)
    }
}
