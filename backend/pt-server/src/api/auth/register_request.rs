use crate::ApiResult;
use crate::api::validation;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    /// Plaintext; handed straight to the hasher
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = Vec::new();

        validation::email(&mut errors, "email", &self.email);
        validation::require_non_blank(&mut errors, "name", &self.name);
        validation::max_chars(&mut errors, "name", &self.name, validation::MAX_NAME_LENGTH);
        validation::password(&mut errors, "password", &self.password);

        validation::finish(errors)
    }
}
