//! Provider profile configuration
//!
// Allow nested config module - this is intentional for the config subsystem

#![allow(clippy::module_inception)]
//!
//! Profiles are stored in a TOML file, one table per named provider. Each
//! profile carries the provider kind, identity endpoint, optional region, and
//! one or more account credential sets addressed by variant index.
//!
//! # Features
//!
//! - Multiple named provider profiles
//! - Secure credential storage using OS keyring (optional)
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

pub mod config;
pub mod credential;
pub mod error;

// Re-export main types for convenience
pub use config::{Account, Config, Credentials, ProviderConfig, ProviderProfile};
pub use credential::CredentialStore;
pub use error::{ConfigError, Result};
