//! Capability-scoped clients
//!
//! Each capability has its own trait so callers can only issue operations
//! that belong to the namespace the client was created for. The OpenStack
//! implementations share [`OpenStackClient`] for auth and HTTP.

pub mod auth;
pub mod compute;
pub mod database;
pub mod openstack;
pub mod orchestration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ApiVersion, Flavor, ResourceTemplate, Server};

pub use compute::OpenStackCompute;
pub use database::OpenStackDatabase;
pub use openstack::OpenStackClient;
pub use orchestration::OpenStackOrchestration;

/// Compute namespace operations
#[async_trait]
pub trait ComputeClient: Send + Sync {
    async fn get_server(&self, server_id: &str) -> Result<Server>;
}

/// Orchestration namespace operations
#[async_trait]
pub trait OrchestrationClient: Send + Sync {
    async fn get_resource_template(&self, resource_type: &str) -> Result<ResourceTemplate>;

    async fn get_version(&self) -> Result<ApiVersion>;
}

/// Database namespace operations
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    async fn get_flavors(&self) -> Result<Vec<Flavor>>;
}
