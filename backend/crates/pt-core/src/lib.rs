pub mod credential_store;
pub mod error;
pub mod models;

pub use credential_store::CredentialStore;
pub use error::{CoreError, CoreResult};
pub use models::difficulty::Difficulty;
pub use models::identity::{Identity, normalize_email};
pub use models::new_identity::NewIdentity;
pub use models::note::Note;
pub use models::password_digest::PasswordDigest;
pub use models::problem::Problem;
pub use models::provider_profile::ProviderProfile;
pub use models::token_snapshot::TokenSnapshot;

#[cfg(test)]
mod tests;
