use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

const PHC_PREFIX: &str = "$argon2";

/// A salted one-way password hash in PHC string form.
///
/// The store only accepts this type for the password column, and construction
/// rejects anything that is not an Argon2 PHC string, so a plaintext password
/// cannot reach persistence by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    #[track_caller]
    pub fn from_phc<S: Into<String>>(value: S) -> CoreResult<Self> {
        let value = value.into();
        if !value.starts_with(PHC_PREFIX) || value.len() <= PHC_PREFIX.len() {
            return Err(CoreError::InvalidPasswordDigest {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
