//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...`) carrying their own salt and
//! cost parameters, so verification works across parameter changes.

use crate::{AuthError, Result as AuthErrorResult};

use pt_core::PasswordDigest;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};
use log::warn;

const DUMMY_PASSWORD: &str = "timing-equalization-only";

#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Verified against when the stored hash cannot be parsed
    dummy_hash: String,
}

impl PasswordHasher {
    /// Build a hasher with explicit Argon2 costs.
    ///
    /// `memory_kib` must be at least `8 * parallelism`.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> AuthErrorResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::password_hash(format!("Invalid Argon2 parameters: {}", e)))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash_blocking(DUMMY_PASSWORD)?.as_str().to_string();

        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash_blocking(&self, plaintext: &str) -> AuthErrorResult<PasswordDigest> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::password_hash(format!("Failed to hash password: {}", e)))?;

        PasswordDigest::from_phc(hash.to_string()).map_err(AuthError::from)
    }

    /// Constant-time check. A malformed stored hash still pays for one full
    /// verification so the caller cannot tell it apart from a wrong password.
    pub fn verify_blocking(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        match PasswordHash::new(digest.as_str()) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!("Stored password hash is malformed: {}", e);
                if let Ok(dummy) = PasswordHash::new(&self.dummy_hash) {
                    let _ = self.argon2().verify_password(plaintext.as_bytes(), &dummy);
                }
                false
            }
        }
    }

    /// Hash on the blocking pool
    pub async fn hash(&self, plaintext: String) -> AuthErrorResult<PasswordDigest> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&plaintext))
            .await
            .map_err(|e| AuthError::password_hash(format!("Hashing task failed: {}", e)))?
    }

    /// Verify on the blocking pool
    pub async fn verify(&self, plaintext: String, digest: PasswordDigest) -> AuthErrorResult<bool> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_blocking(&plaintext, &digest))
            .await
            .map_err(|e| AuthError::password_hash(format!("Verification task failed: {}", e)))
    }
}
