//! Axum extractor for the identity resolved by the auth gate

use crate::ApiError;

use pt_core::Identity;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// The authenticated caller.
///
/// Inserted into request extensions by the gate middleware. Extraction fails
/// with 401 when the extension is missing, so a handler mounted outside the
/// gate still cannot run anonymously.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            parts
                .extensions
                .get::<CurrentIdentity>()
                .cloned()
                .ok_or_else(|| {
                    log::warn!("Protected handler reached without a gate-resolved identity");
                    ApiError::unauthenticated()
                })
        }
    }
}
