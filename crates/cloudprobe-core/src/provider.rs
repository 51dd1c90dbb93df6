//! Provider kinds and the capabilities they expose

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Rackspace identity endpoint
pub const RACKSPACE_AUTH_URL: &str = "https://identity.api.rackspacecloud.com";

/// Supported provider backends
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Rackspace,
    Openstack,
}

/// Resource namespace a client is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Compute,
    Orchestration,
    Database,
}

impl ProviderKind {
    /// Identity endpoint used when the profile does not set one
    pub fn default_auth_url(self) -> Option<&'static str> {
        match self {
            ProviderKind::Rackspace => Some(RACKSPACE_AUTH_URL),
            ProviderKind::Openstack => None,
        }
    }

    /// Service catalog type that backs `capability`
    pub fn service_type(self, capability: Capability) -> &'static str {
        match (self, capability) {
            (_, Capability::Compute) => "compute",
            (_, Capability::Orchestration) => "orchestration",
            (ProviderKind::Rackspace, Capability::Database) => "rax:database",
            (ProviderKind::Openstack, Capability::Database) => "database",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Rackspace => write!(f, "rackspace"),
            ProviderKind::Openstack => write!(f, "openstack"),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Compute => write!(f, "compute"),
            Capability::Orchestration => write!(f, "orchestration"),
            Capability::Database => write!(f, "database"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_service_type_differs_by_provider() {
        assert_eq!(
            ProviderKind::Rackspace.service_type(Capability::Database),
            "rax:database"
        );
        assert_eq!(
            ProviderKind::Openstack.service_type(Capability::Database),
            "database"
        );
    }

    #[test]
    fn test_provider_kind_serde_lowercase() {
        let kind: ProviderKind = serde_json::from_str("\"openstack\"").unwrap();
        assert_eq!(kind, ProviderKind::Openstack);
        assert_eq!(serde_json::to_string(&ProviderKind::Rackspace).unwrap(), "\"rackspace\"");
    }
}
