//! Unified error handling for cloudprobe-core
//!
//! Every failure of a remote call ends the invocation. The helper methods
//! exist for presentation, not for retry decisions.
//!
//! # Example
//!
//! ```rust
//! use cloudprobe_core::CoreError;
//!
//! let err = CoreError::Api { status: 404, message: "Server not found".to_string() };
//! assert!(err.is_not_found());
//! ```

use crate::provider::Capability;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Provider answered with a non-success HTTP status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Service catalog has no endpoint for the requested capability
    #[error("No {service_type} endpoint in service catalog{}", region.as_ref().map(|r| format!(" for region {r}")).unwrap_or_default())]
    EndpointNotFound {
        service_type: String,
        region: Option<String>,
    },

    /// Operation was issued against a client scoped to a different capability
    #[error("Operation requires the {expected} capability but the client is scoped to {actual}")]
    CapabilityMismatch {
        expected: Capability,
        actual: Capability,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Api { status: 404, .. })
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Api { status: 401 | 403, .. })
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, CoreError::Api { status, .. } if *status >= 500)
    }
}
