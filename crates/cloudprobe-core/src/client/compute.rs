use async_trait::async_trait;
use serde::Deserialize;

use super::{ComputeClient, OpenStackClient};
use crate::error::Result;
use crate::types::Server;

#[derive(Deserialize)]
struct ServerEnvelope {
    server: Server,
}

/// Nova-compatible compute client
pub struct OpenStackCompute {
    inner: OpenStackClient,
}

impl OpenStackCompute {
    pub fn new(inner: OpenStackClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ComputeClient for OpenStackCompute {
    async fn get_server(&self, server_id: &str) -> Result<Server> {
        let envelope: ServerEnvelope = self.inner.get_json(&["servers", server_id]).await?;
        Ok(envelope.server)
    }
}
