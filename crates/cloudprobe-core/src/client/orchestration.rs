use async_trait::async_trait;
use serde::Deserialize;

use super::{OpenStackClient, OrchestrationClient};
use crate::error::{CoreError, Result};
use crate::types::{ApiVersion, ResourceTemplate};

/// Version discovery answers with either a list or a single entry
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionDocument {
    Many { versions: Vec<ApiVersion> },
    One { version: ApiVersion },
}

/// Heat-compatible orchestration client
pub struct OpenStackOrchestration {
    inner: OpenStackClient,
}

impl OpenStackOrchestration {
    pub fn new(inner: OpenStackClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrchestrationClient for OpenStackOrchestration {
    async fn get_resource_template(&self, resource_type: &str) -> Result<ResourceTemplate> {
        self.inner
            .get_json(&["resource_types", resource_type, "template"])
            .await
    }

    async fn get_version(&self) -> Result<ApiVersion> {
        let document: VersionDocument = self.inner.get_root().await?;
        match document {
            VersionDocument::One { version } => Ok(version),
            VersionDocument::Many { versions } => current_version(versions),
        }
    }
}

fn current_version(versions: Vec<ApiVersion>) -> Result<ApiVersion> {
    let current = versions
        .iter()
        .position(|v| v.status.eq_ignore_ascii_case("CURRENT"))
        .unwrap_or(0);
    versions
        .into_iter()
        .nth(current)
        .ok_or_else(|| CoreError::Decode("version document lists no versions".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(id: &str, status: &str) -> ApiVersion {
        ApiVersion {
            id: id.to_string(),
            status: status.to_string(),
            links: Vec::new(),
        }
    }

    #[test]
    fn test_current_version_is_preferred() {
        let picked = current_version(vec![
            version("v0.9", "DEPRECATED"),
            version("v1.0", "CURRENT"),
        ])
        .unwrap();
        assert_eq!(picked.id, "v1.0");
    }

    #[test]
    fn test_first_version_without_current() {
        let picked = current_version(vec![version("v1.0", "SUPPORTED")]).unwrap();
        assert_eq!(picked.id, "v1.0");
    }

    #[test]
    fn test_empty_version_list_is_an_error() {
        assert!(matches!(current_version(vec![]), Err(CoreError::Decode(_))));
    }
}
