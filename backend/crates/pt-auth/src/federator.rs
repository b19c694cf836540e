use crate::{AuthError, Result as AuthErrorResult};

use pt_core::{CoreError, CredentialStore, Identity, NewIdentity, ProviderProfile};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};

/// Maps a verified provider profile onto a local identity, creating it on first sight.
#[derive(Clone)]
pub struct OAuthFederator {
    store: Arc<dyn CredentialStore>,
}

impl OAuthFederator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, profile: &ProviderProfile) -> AuthErrorResult<Identity> {
        if profile.provider_id.trim().is_empty() || profile.email.trim().is_empty() {
            return Err(AuthError::provider("profile is missing provider id or email"));
        }

        if let Some(existing) = self.store.find_by_provider_id(&profile.provider_id).await? {
            return Ok(existing);
        }

        match self.store.create(NewIdentity::federated(profile)).await {
            Ok(identity) => {
                info!("Created federated identity {}", identity.id);
                Ok(identity)
            }
            // Lost a race on provider_id: reuse the winner. If the provider id is
            // still unknown the email belongs to a local account and linking is not
            // supported.
            Err(CoreError::Conflict { field, .. }) => {
                match self.store.find_by_provider_id(&profile.provider_id).await? {
                    Some(winner) => Ok(winner),
                    None => {
                        warn!("Federated email collides with an existing account");
                        Err(AuthError::Conflict {
                            field,
                            location: ErrorLocation::from(Location::caller()),
                        })
                    }
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
