//! Keystone v2 token exchange and service catalog lookup

use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::config::config::Credentials;
use crate::error::{CoreError, Result};

/// Token and catalog obtained from the identity service
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    access: Access,
}

#[derive(Debug, Deserialize)]
struct Access {
    token: Token,
    #[serde(default, rename = "serviceCatalog")]
    service_catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct Token {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEndpoint {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "publicURL")]
    pub public_url: String,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            token: response.access.token.id,
            catalog: response.access.service_catalog,
        }
    }
}

impl Session {
    /// Find the public endpoint for `service_type`
    ///
    /// With a region, an endpoint in that region wins and a region-less
    /// (global) endpoint is the fallback. Without one, the first endpoint is used.
    pub fn endpoint(&self, service_type: &str, region: Option<&str>) -> Result<Url> {
        let endpoints = self
            .catalog
            .iter()
            .filter(|entry| entry.service_type == service_type)
            .flat_map(|entry| entry.endpoints.iter());

        let chosen = match region {
            Some(region) => {
                let candidates: Vec<_> = endpoints.collect();
                candidates
                    .iter()
                    .find(|e| {
                        e.region
                            .as_deref()
                            .is_some_and(|r| r.eq_ignore_ascii_case(region))
                    })
                    .or_else(|| candidates.iter().find(|e| e.region.is_none()))
                    .copied()
            }
            None => endpoints.into_iter().next(),
        };

        let endpoint = chosen.ok_or_else(|| CoreError::EndpointNotFound {
            service_type: service_type.to_string(),
            region: region.map(str::to_string),
        })?;

        Url::parse(&endpoint.public_url).map_err(|e| {
            CoreError::Decode(format!(
                "invalid {} endpoint '{}': {}",
                service_type, endpoint.public_url, e
            ))
        })
    }
}

/// URL of the token resource under `auth_url`
pub fn tokens_url(auth_url: &Url) -> Url {
    let mut url = auth_url.clone();
    let path = url.path().trim_end_matches('/').to_string();
    let base = if path.ends_with("/v2.0") {
        path
    } else {
        format!("{path}/v2.0")
    };
    url.set_path(&format!("{base}/tokens"));
    url
}

/// Request body for the token exchange
pub fn auth_body(credentials: &Credentials) -> Value {
    match credentials {
        Credentials::ApiKey { username, api_key } => json!({
            "auth": {
                "RAX-KSKEY:apiKeyCredentials": {
                    "username": username,
                    "apiKey": api_key,
                }
            }
        }),
        Credentials::Password {
            username,
            password,
            tenant_id,
            tenant_name,
        } => {
            let mut auth = json!({
                "passwordCredentials": {
                    "username": username,
                    "password": password,
                }
            });
            if let Some(id) = tenant_id {
                auth["tenantId"] = json!(id);
            }
            if let Some(name) = tenant_name {
                auth["tenantName"] = json!(name);
            }
            json!({ "auth": auth })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        let response: AuthResponse = serde_json::from_value(json!({
            "access": {
                "token": {"id": "tok", "expires": "2030-01-01T00:00:00Z"},
                "serviceCatalog": [
                    {
                        "type": "compute",
                        "name": "cloudServersOpenStack",
                        "endpoints": [
                            {"region": "DFW", "publicURL": "https://dfw.servers.example.com/v2/1"},
                            {"region": "ORD", "publicURL": "https://ord.servers.example.com/v2/1"}
                        ]
                    },
                    {
                        "type": "rax:database",
                        "name": "cloudDatabases",
                        "endpoints": [
                            {"publicURL": "https://global.db.example.com/v1.0/1"}
                        ]
                    }
                ]
            }
        }))
        .unwrap();
        response.into()
    }

    #[test]
    fn test_endpoint_prefers_matching_region() {
        let url = session().endpoint("compute", Some("ord")).unwrap();
        assert_eq!(url.as_str(), "https://ord.servers.example.com/v2/1");
    }

    #[test]
    fn test_endpoint_falls_back_to_global() {
        let url = session().endpoint("rax:database", Some("DFW")).unwrap();
        assert_eq!(url.host_str(), Some("global.db.example.com"));
    }

    #[test]
    fn test_endpoint_without_region_takes_first() {
        let url = session().endpoint("compute", None).unwrap();
        assert_eq!(url.host_str(), Some("dfw.servers.example.com"));
    }

    #[test]
    fn test_endpoint_missing_service() {
        let err = session().endpoint("orchestration", Some("DFW")).unwrap_err();
        assert!(matches!(err, CoreError::EndpointNotFound { .. }));
    }

    #[test]
    fn test_tokens_url() {
        let cases = [
            ("https://identity.example.com", "https://identity.example.com/v2.0/tokens"),
            ("https://identity.example.com/v2.0", "https://identity.example.com/v2.0/tokens"),
            (
                "https://keystone.example.com:5000/v2.0/",
                "https://keystone.example.com:5000/v2.0/tokens",
            ),
            ("https://example.com/identity", "https://example.com/identity/v2.0/tokens"),
        ];
        for (input, expected) in cases {
            let url = tokens_url(&Url::parse(input).unwrap());
            assert_eq!(url.as_str(), expected, "input {input}");
        }
    }

    #[test]
    fn test_auth_body_shapes() {
        let rax = auth_body(&Credentials::ApiKey {
            username: "demo".to_string(),
            api_key: "k".to_string(),
        });
        assert_eq!(rax["auth"]["RAX-KSKEY:apiKeyCredentials"]["apiKey"], "k");

        let os = auth_body(&Credentials::Password {
            username: "demo".to_string(),
            password: "p".to_string(),
            tenant_id: None,
            tenant_name: Some("project".to_string()),
        });
        assert_eq!(os["auth"]["passwordCredentials"]["password"], "p");
        assert_eq!(os["auth"]["tenantName"], "project");
        assert!(os["auth"].get("tenantId").is_none());
    }
}
