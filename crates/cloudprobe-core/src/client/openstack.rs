//! HTTP plumbing shared by every capability client

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Level;
use url::Url;

use super::auth::{self, AuthResponse, Session};
use crate::config::ProviderConfig;
use crate::error::{CoreError, Result};
use crate::events::{ClientEvent, SharedSink};
use crate::provider::Capability;

/// User agent string for cloudprobe HTTP requests
const USER_AGENT: &str = concat!("cloudprobe/", env!("CARGO_PKG_VERSION"));

/// Authenticated REST client bound to one provider profile and one capability
///
/// The identity exchange runs on the first request; the resulting token and
/// catalog are kept for the lifetime of the client.
pub struct OpenStackClient {
    http: reqwest::Client,
    config: ProviderConfig,
    service_type: &'static str,
    sink: SharedSink,
    session: Mutex<Option<Arc<Session>>>,
}

impl OpenStackClient {
    pub fn new(config: ProviderConfig, capability: Capability, sink: SharedSink) -> Result<Self> {
        let service_type = config.kind.service_type(capability);

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            config,
            service_type,
            sink,
            session: Mutex::new(None),
        })
    }

    fn emit(&self, level: Level, name: &'static str, message: String) {
        self.sink.emit(ClientEvent::new(level, name, message));
    }

    async fn session(&self) -> Result<Arc<Session>> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.as_ref() {
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(self.authenticate().await?);
        *guard = Some(Arc::clone(&session));
        Ok(session)
    }

    async fn authenticate(&self) -> Result<Session> {
        let url = auth::tokens_url(&self.config.auth_url);
        self.emit(
            Level::DEBUG,
            "auth::request",
            format!(
                "Authenticating {} against {}",
                self.config.credentials.username(),
                url
            ),
        );

        let response = self
            .http
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&auth::auth_body(&self.config.credentials))
            .send()
            .await?;

        let response: AuthResponse = self.decode(&url, response).await?;
        let session = Session::from(response);
        self.emit(
            Level::DEBUG,
            "auth::success",
            format!(
                "Authenticated with {} service catalog entries",
                session.catalog.len()
            ),
        );
        Ok(session)
    }

    /// Public endpoint for this client's capability
    pub async fn endpoint(&self) -> Result<Url> {
        let session = self.session().await?;
        session.endpoint(self.service_type, self.config.region.as_deref())
    }

    /// GET `segments` below the capability endpoint and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let mut url = self.endpoint().await?;
        if url.cannot_be_a_base() {
            return Err(CoreError::Decode(format!(
                "endpoint '{}' cannot be a base",
                url
            )));
        }
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        self.get_url(url).await
    }

    /// GET the root of the capability endpoint's host (version discovery)
    pub async fn get_root<T: DeserializeOwned>(&self) -> Result<T> {
        let mut url = self.endpoint().await?;
        url.set_path("/");
        url.set_query(None);
        self.get_url(url).await
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let session = self.session().await?;
        self.emit(Level::DEBUG, "request", format!("GET {}", url));

        let response = self
            .http
            .get(url.clone())
            .header("X-Auth-Token", session.token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        self.decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        self.emit(
            Level::DEBUG,
            "response",
            format!("{} {}", status.as_u16(), url),
        );

        // Version discovery answers 300 Multiple Choices with a normal body
        if !status.is_success() && status != StatusCode::MULTIPLE_CHOICES {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

/// Pull a human readable message out of a provider error body
///
/// Nova and Trove wrap errors as `{"itemNotFound": {"message": ..}}`, Keystone
/// and Heat use `{"error": {"message": ..}}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .values()
            .find_map(|v| v.get("message").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(fallback),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => fallback(),
    }
}
