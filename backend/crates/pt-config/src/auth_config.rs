use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, MAX_HASH_ITERATIONS, MAX_HASH_MEMORY_KIB, MAX_HASH_PARALLELISM,
    MIN_SECRET_LENGTH,
};

use std::fmt;

use serde::Deserialize;

/// Token signing secrets and Argon2 cost parameters
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_secret: Option<String>,
    pub refresh_token_secret: Option<String>,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: None,
            refresh_token_secret: None,
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            hash_parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &self.access_token_secret.as_ref().map(|_| "<redacted>"))
            .field("refresh_token_secret", &self.refresh_token_secret.as_ref().map(|_| "<redacted>"))
            .field("hash_memory_kib", &self.hash_memory_kib)
            .field("hash_iterations", &self.hash_iterations)
            .field("hash_parallelism", &self.hash_parallelism)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let (access, refresh) = self.secrets()?;

        for (name, secret) in [
            ("access_token_secret", access),
            ("refresh_token_secret", refresh),
        ] {
            if secret.len() < MIN_SECRET_LENGTH {
                return Err(ConfigError::auth(format!(
                    "auth.{} must be at least {} characters",
                    name, MIN_SECRET_LENGTH
                )));
            }
        }

        if access == refresh {
            return Err(ConfigError::auth(
                "auth.access_token_secret and auth.refresh_token_secret must differ",
            ));
        }

        if self.hash_parallelism == 0 || self.hash_parallelism > MAX_HASH_PARALLELISM {
            return Err(ConfigError::auth(format!(
                "auth.hash_parallelism must be 1-{}, got {}",
                MAX_HASH_PARALLELISM, self.hash_parallelism
            )));
        }

        if self.hash_iterations == 0 || self.hash_iterations > MAX_HASH_ITERATIONS {
            return Err(ConfigError::auth(format!(
                "auth.hash_iterations must be 1-{}, got {}",
                MAX_HASH_ITERATIONS, self.hash_iterations
            )));
        }

        // Argon2 needs at least 8 KiB per lane
        let min_memory = 8 * self.hash_parallelism;
        if self.hash_memory_kib < min_memory || self.hash_memory_kib > MAX_HASH_MEMORY_KIB {
            return Err(ConfigError::auth(format!(
                "auth.hash_memory_kib must be {}-{}, got {}",
                min_memory, MAX_HASH_MEMORY_KIB, self.hash_memory_kib
            )));
        }

        Ok(())
    }

    /// Both signing secrets, or an error naming the first one missing
    pub fn secrets(&self) -> ConfigErrorResult<(&str, &str)> {
        let access = self
            .access_token_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::auth("auth.access_token_secret is required"))?;
        let refresh = self
            .refresh_token_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::auth("auth.refresh_token_secret is required"))?;

        Ok((access, refresh))
    }
}
