use crate::{PasswordDigest, ProviderProfile, normalize_email};

/// Identity record that has not been persisted yet.
///
/// Exactly one of `password_digest` / `provider_id` is set by the constructors;
/// accounts are never linked across both paths.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub name: String,
    pub password_digest: Option<PasswordDigest>,
    pub provider_id: Option<String>,
}

impl NewIdentity {
    pub fn local(email: &str, name: String, password_digest: PasswordDigest) -> Self {
        Self {
            email: normalize_email(email),
            name,
            password_digest: Some(password_digest),
            provider_id: None,
        }
    }

    pub fn federated(profile: &ProviderProfile) -> Self {
        Self {
            email: normalize_email(&profile.email),
            name: profile.display_name.clone(),
            password_digest: None,
            provider_id: Some(profile.provider_id.clone()),
        }
    }
}
