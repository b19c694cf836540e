use serde::{Deserialize, Serialize};

/// Verified profile handed over by a federated identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub provider_id: String,
    pub email: String,
    pub display_name: String,
}
