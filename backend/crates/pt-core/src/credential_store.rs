//! Abstract identity store consumed by the auth layer.

use crate::{CoreResult, Identity, NewIdentity};

use async_trait::async_trait;
use uuid::Uuid;

/// Persisted identity records keyed by id, email and federated provider id.
///
/// Lookups return `Ok(None)` for absence. `create` must rely on the backing
/// store's uniqueness constraints: when two creations race on the same email
/// (or provider id) exactly one succeeds and the other gets
/// [`CoreError::Conflict`](crate::CoreError::Conflict).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> CoreResult<Option<Identity>>;

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Identity>>;

    async fn find_by_provider_id(&self, provider_id: &str) -> CoreResult<Option<Identity>>;

    async fn create(&self, identity: NewIdentity) -> CoreResult<Identity>;

    /// Persist mutations of an existing record; repeating a save is harmless
    async fn save(&self, identity: &Identity) -> CoreResult<()>;
}
