//! Configuration management for cloudprobe
//!
//! Handles loading named provider profiles from a TOML file and resolving one
//! profile plus account variant into a ready-to-use [`ProviderConfig`].
//!
//! ```toml
//! default_provider = "rackspace"
//!
//! [providers.rackspace]
//! provider = "rackspace"
//! region = "DFW"
//!
//! [[providers.rackspace.accounts]]
//! username = "demo"
//! api_key = "${RACKSPACE_API_KEY}"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::credential::{API_KEY_ENV, CredentialStore, PASSWORD_ENV, USERNAME_ENV};
use super::error::{ConfigError, Result};
use crate::provider::ProviderKind;

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when a command does not name a provider
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Map of profile name -> provider profile
    #[serde(default)]
    pub providers: HashMap<String, ProviderProfile>,
}

/// A named provider profile as written in the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderProfile {
    /// Which kind of backend this profile talks to
    pub provider: ProviderKind,
    /// Identity endpoint; Rackspace profiles fall back to the public identity service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    /// Region used to pick endpoints from the service catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Credential sets, addressed by variant index
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// One set of account credentials
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_name: Option<String>,
}

/// Resolved credentials handed to the identity exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Rackspace API key authentication
    ApiKey { username: String, api_key: String },
    /// Keystone password authentication
    Password {
        username: String,
        password: String,
        tenant_id: Option<String>,
        tenant_name: Option<String>,
    },
}

impl Credentials {
    pub fn username(&self) -> &str {
        match self {
            Credentials::ApiKey { username, .. } | Credentials::Password { username, .. } => {
                username
            }
        }
    }
}

/// Fully resolved provider configuration for one client
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Profile name the configuration was resolved from
    pub name: String,
    pub kind: ProviderKind,
    pub auth_url: Url,
    pub region: Option<String>,
    pub credentials: Credentials,
}

impl ProviderProfile {
    /// Resolve the account at `variant` into concrete credentials
    pub fn resolve_account(&self, name: &str, variant: usize) -> Result<Credentials> {
        let account = self
            .accounts
            .get(variant)
            .ok_or_else(|| ConfigError::VariantNotFound {
                name: name.to_string(),
                variant,
                available: self.accounts.len(),
            })?;

        let store = CredentialStore::new();
        let username = store
            .get_credential(&account.username, Some(USERNAME_ENV))
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve username: {}", e))
            })?;
        let api_key = resolve_optional(&store, account.api_key.as_deref(), API_KEY_ENV)
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve API key: {}", e))
            })?;
        let password = resolve_optional(&store, account.password.as_deref(), PASSWORD_ENV)
            .map_err(|e| {
                ConfigError::CredentialError(format!("Failed to resolve password: {}", e))
            })?;

        // Rackspace prefers API keys; plain Keystone only understands passwords
        match (self.provider, api_key, password) {
            (ProviderKind::Rackspace, Some(api_key), _) => {
                Ok(Credentials::ApiKey { username, api_key })
            }
            (_, _, Some(password)) => Ok(Credentials::Password {
                username,
                password,
                tenant_id: account.tenant_id.clone(),
                tenant_name: account.tenant_name.clone(),
            }),
            (ProviderKind::Rackspace, None, None) => Err(ConfigError::MissingField {
                name: name.to_string(),
                field: "api_key or password",
            }),
            (ProviderKind::Openstack, _, None) => Err(ConfigError::MissingField {
                name: name.to_string(),
                field: "password",
            }),
        }
    }

    /// Identity endpoint for this profile
    pub fn resolve_auth_url(&self, name: &str) -> Result<Url> {
        let raw = match (&self.auth_url, self.provider.default_auth_url()) {
            (Some(url), _) => url.as_str(),
            (None, Some(default)) => default,
            (None, None) => {
                return Err(ConfigError::MissingField {
                    name: name.to_string(),
                    field: "auth_url",
                });
            }
        };

        Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
    }
}

fn resolve_optional(
    store: &CredentialStore,
    value: Option<&str>,
    env_var: &str,
) -> Result<Option<String>> {
    if let Ok(env_value) = std::env::var(env_var) {
        return Ok(Some(env_value));
    }
    value.map(|v| store.get_credential(v, None)).transpose()
}

impl Config {
    /// Get all profile names of the specified provider kind, sorted
    pub fn get_profiles_of_kind(&self, kind: ProviderKind) -> Vec<&str> {
        let mut profiles: Vec<_> = self
            .providers
            .iter()
            .filter(|(_, p)| p.provider == kind)
            .map(|(name, _)| name.as_str())
            .collect();
        profiles.sort();
        profiles
    }

    /// List all profile names sorted
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.providers.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Resolve which profile a command should use
    ///
    /// Resolution order:
    /// 1. The explicitly named profile
    /// 2. `default_provider`
    /// 3. The first profile (alphabetically) of `preferred` kind
    pub fn resolve_provider_name(
        &self,
        explicit: Option<&str>,
        preferred: Option<ProviderKind>,
    ) -> Result<String> {
        if let Some(name) = explicit {
            return Ok(name.to_string());
        }

        if let Some(ref default) = self.default_provider {
            return Ok(default.clone());
        }

        if let Some(kind) = preferred
            && let Some(name) = self.get_profiles_of_kind(kind).first()
        {
            return Ok((*name).to_string());
        }

        Err(ConfigError::ProfileNotFound {
            name: preferred
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "<default>".to_string()),
            suggestion: self.available_suggestion(),
        })
    }

    /// Resolve a named profile and account variant into a [`ProviderConfig`]
    pub fn provider_config(&self, name: &str, variant: usize) -> Result<ProviderConfig> {
        let profile = self
            .providers
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
                suggestion: self.available_suggestion(),
            })?;

        Ok(ProviderConfig {
            name: name.to_string(),
            kind: profile.provider,
            auth_url: profile.resolve_auth_url(name)?,
            region: profile.region.clone(),
            credentials: profile.resolve_account(name, variant)?,
        })
    }

    fn available_suggestion(&self) -> String {
        let names = self.profile_names();
        if names.is_empty() {
            "No provider profiles are configured.".to_string()
        } else {
            format!("Available profiles: {}.", names.join(", "))
        }
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Get the path to the configuration file
    ///
    /// On Linux: ~/.config/cloudprobe/config.toml
    /// On macOS: ~/Library/Application Support/org.cloudprobe.cloudprobe/config.toml
    /// On Windows: %APPDATA%\cloudprobe\cloudprobe\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "cloudprobe", "cloudprobe")
            .ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand environment variables in configuration content
    ///
    /// Supports ${VAR} and ${VAR:-default}. Unset variables are left as-is so
    /// profiles that are not used this run do not fail to load.
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}
