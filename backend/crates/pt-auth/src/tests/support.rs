use crate::{PasswordHasher, SessionService, TokenIssuer};

use pt_core::{CoreError, CoreResult, CredentialStore, Identity, NewIdentity};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

pub const ACCESS_SECRET: &[u8] = b"access-secret-key-at-least-32-bytes!";
pub const REFRESH_SECRET: &[u8] = b"refresh-secret-key-at-least-32-bytes";

/// In-memory store enforcing the same uniqueness rules as the SQLite schema
#[derive(Default)]
pub struct MemoryCredentialStore {
    identities: Mutex<Vec<Identity>>,
}

impl MemoryCredentialStore {
    pub fn len(&self) -> usize {
        self.identities.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Identity> {
        self.identities
            .lock()
            .unwrap()
            .iter()
            .find(|identity| identity.id == id)
            .cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Identity>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Identity>> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|identity| identity.email == email)
            .cloned())
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> CoreResult<Option<Identity>> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|identity| identity.provider_id.as_deref() == Some(provider_id))
            .cloned())
    }

    async fn create(&self, new: NewIdentity) -> CoreResult<Identity> {
        let mut identities = self.identities.lock().unwrap();

        if identities.iter().any(|identity| identity.email == new.email) {
            return Err(CoreError::conflict("email"));
        }
        if new.provider_id.is_some()
            && identities
                .iter()
                .any(|identity| identity.provider_id == new.provider_id)
        {
            return Err(CoreError::conflict("provider_id"));
        }

        let identity = Identity::from_new(new);
        identities.push(identity.clone());
        Ok(identity)
    }

    async fn save(&self, identity: &Identity) -> CoreResult<()> {
        let mut identities = self.identities.lock().unwrap();
        match identities.iter_mut().find(|existing| existing.id == identity.id) {
            Some(existing) => {
                *existing = identity.clone();
                Ok(())
            }
            None => Err(CoreError::store("no such identity")),
        }
    }
}

/// Store whose every call fails the way a locked or unreachable database would
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn find_by_id(&self, _id: Uuid) -> CoreResult<Option<Identity>> {
        Err(CoreError::store("database is locked"))
    }

    async fn find_by_email(&self, _email: &str) -> CoreResult<Option<Identity>> {
        Err(CoreError::store("database is locked"))
    }

    async fn find_by_provider_id(&self, _provider_id: &str) -> CoreResult<Option<Identity>> {
        Err(CoreError::store("database is locked"))
    }

    async fn create(&self, _new: NewIdentity) -> CoreResult<Identity> {
        Err(CoreError::store("database is locked"))
    }

    async fn save(&self, _identity: &Identity) -> CoreResult<()> {
        Err(CoreError::store("database is locked"))
    }
}

pub fn test_issuer() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(ACCESS_SECRET, REFRESH_SECRET))
}

/// Minimum Argon2 costs keep the suite fast
pub fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(8, 1, 1).unwrap()
}

pub fn test_service() -> (SessionService, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::default());
    let service = SessionService::new(store.clone(), fast_hasher(), test_issuer());
    (service, store)
}
