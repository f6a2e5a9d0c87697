use serde::{Deserialize, Serialize};

pub mod logging;

// ============================================================================
// Users
// ============================================================================

/// A user as seen by callers: the identity backend id plus its username.
///
/// `username` is empty when the identity backend has no record for a guid
/// that the cloud controller still lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub guid: String,
    pub username: String,
}

impl UserFields {
    pub fn new(guid: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            username: username.into(),
        }
    }
}

// ============================================================================
// Named platform resources
// ============================================================================

/// Root filesystem a droplet runs on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buildpack {
    pub guid: String,
    pub name: String,
    /// Detection order; `None` when the backend did not report one
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A provisioned service in a space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub guid: String,
    pub name: String,
    /// Empty for user-provided instances
    #[serde(default)]
    pub service_plan_guid: String,
}
