pub mod difficulty;
pub mod identity;
pub mod new_identity;
pub mod note;
pub mod password_digest;
pub mod problem;
pub mod provider_profile;
pub mod token_snapshot;
