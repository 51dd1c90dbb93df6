//! Payloads returned by the read operations

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Compute instance descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default, rename = "hostId")]
    pub host_id: Option<String>,
    #[serde(default)]
    pub flavor: Option<ResourceRef>,
    /// Empty string for volume-backed servers, an object otherwise
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub addresses: BTreeMap<String, Vec<Address>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub addr: String,
    pub version: u8,
}

/// Database instance sizing option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flavor {
    /// Rackspace returns integer ids, Trove returns strings
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    /// Memory in MB
    pub ram: u64,
}

/// Orchestration resource type template (a HOT/CFN document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceTemplate(pub Value);

/// One entry of a service version document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiVersion {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flavor_accepts_numeric_and_string_ids() {
        let flavors: Vec<Flavor> = serde_json::from_value(json!([
            {"id": 1, "name": "512MB Instance", "ram": 512, "links": []},
            {"id": "m1.small", "name": "small", "ram": 2048}
        ]))
        .unwrap();

        assert_eq!(flavors[0].id, "1");
        assert_eq!(flavors[1].id, "m1.small");
    }

    #[test]
    fn test_server_tolerates_volume_backed_image() {
        let server: Server = serde_json::from_value(json!({
            "id": "a1b2",
            "name": "web-01",
            "status": "ACTIVE",
            "hostId": "h1",
            "image": "",
            "flavor": {"id": "2", "links": []},
            "addresses": {"public": [{"addr": "10.0.0.5", "version": 4}]}
        }))
        .unwrap();

        assert_eq!(server.image, Some(json!("")));
        assert_eq!(server.addresses["public"][0].addr, "10.0.0.5");
        assert!(server.metadata.is_empty());
    }
}
