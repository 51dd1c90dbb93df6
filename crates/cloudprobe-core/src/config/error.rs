//! Error types for configuration operations

use thiserror::Error;

/// Errors that can occur while loading and resolving provider profiles
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Provider profile '{name}' not found. {suggestion}")]
    ProfileNotFound { name: String, suggestion: String },

    #[error("Provider profile '{name}' has no account variant {variant} ({available} configured)")]
    VariantNotFound {
        name: String,
        variant: usize,
        available: usize,
    },

    #[error("Provider profile '{name}' is missing {field}")]
    MissingField { name: String, field: &'static str },

    #[error("Invalid auth URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to resolve credential: {0}")]
    CredentialError(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    KeyringError(String),

    #[error("Failed to determine config directory")]
    ConfigDirError,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
