//! Builds capability-scoped clients from resolved provider configuration

use std::sync::Arc;
use tracing::debug;

use crate::client::{
    ComputeClient, DatabaseClient, OpenStackClient, OpenStackCompute, OpenStackDatabase,
    OpenStackOrchestration, OrchestrationClient,
};
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::events::{EventSink, SharedSink};
use crate::provider::Capability;

/// A client tagged with the capability it was built for
pub enum ScopedClient {
    Compute(Box<dyn ComputeClient>),
    Orchestration(Box<dyn OrchestrationClient>),
    Database(Box<dyn DatabaseClient>),
}

impl ScopedClient {
    pub fn capability(&self) -> Capability {
        match self {
            ScopedClient::Compute(_) => Capability::Compute,
            ScopedClient::Orchestration(_) => Capability::Orchestration,
            ScopedClient::Database(_) => Capability::Database,
        }
    }
}

/// Creates clients that all report through the same event sink
#[derive(Clone)]
pub struct ClientFactory {
    sink: SharedSink,
}

impl ClientFactory {
    pub fn new(sink: impl EventSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn with_shared_sink(sink: SharedSink) -> Self {
        Self { sink }
    }

    /// Build a client for `capability` against the provider in `config`
    ///
    /// No network traffic happens here; authentication is deferred to the
    /// first operation.
    pub fn create(&self, config: ProviderConfig, capability: Capability) -> Result<ScopedClient> {
        debug!(
            provider = %config.kind,
            profile = %config.name,
            %capability,
            "Creating client"
        );

        let inner = OpenStackClient::new(config, capability, Arc::clone(&self.sink))?;
        Ok(match capability {
            Capability::Compute => ScopedClient::Compute(Box::new(OpenStackCompute::new(inner))),
            Capability::Orchestration => {
                ScopedClient::Orchestration(Box::new(OpenStackOrchestration::new(inner)))
            }
            Capability::Database => ScopedClient::Database(Box::new(OpenStackDatabase::new(inner))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::Credentials;
    use crate::events::NullSink;
    use crate::provider::ProviderKind;
    use url::Url;

    fn config(kind: ProviderKind) -> ProviderConfig {
        ProviderConfig {
            name: kind.to_string(),
            kind,
            auth_url: Url::parse("https://identity.example.com").unwrap(),
            region: None,
            credentials: Credentials::ApiKey {
                username: "demo".to_string(),
                api_key: "key".to_string(),
            },
        }
    }

    #[test]
    fn test_every_provider_builds_every_capability() {
        let factory = ClientFactory::new(NullSink);
        for kind in [ProviderKind::Rackspace, ProviderKind::Openstack] {
            for capability in [
                Capability::Compute,
                Capability::Orchestration,
                Capability::Database,
            ] {
                let client = factory.create(config(kind), capability).unwrap();
                assert_eq!(client.capability(), capability);
            }
        }
    }
}
