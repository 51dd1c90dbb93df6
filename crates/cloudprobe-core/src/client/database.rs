use async_trait::async_trait;
use serde::Deserialize;

use super::{DatabaseClient, OpenStackClient};
use crate::error::Result;
use crate::types::Flavor;

#[derive(Deserialize)]
struct FlavorsEnvelope {
    flavors: Vec<Flavor>,
}

/// Cloud Databases / Trove client
pub struct OpenStackDatabase {
    inner: OpenStackClient,
}

impl OpenStackDatabase {
    pub fn new(inner: OpenStackClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DatabaseClient for OpenStackDatabase {
    async fn get_flavors(&self) -> Result<Vec<Flavor>> {
        let envelope: FlavorsEnvelope = self.inner.get_json(&["flavors"]).await?;
        Ok(envelope.flavors)
    }
}
