//! Credential resolution with optional keyring support
//!
//! Account credentials in a profile are resolved in this order:
//! - Environment variable override
//! - OS keyring, when the value is a `keyring:` reference (feature `secure-storage`)
//! - The plaintext value as written in the config file

use super::error::{ConfigError, Result};
use std::env;

/// Prefix that indicates a value should be retrieved from the keyring
const KEYRING_PREFIX: &str = "keyring:";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "cloudprobe";

/// Environment override for the account username
pub const USERNAME_ENV: &str = "CLOUDPROBE_USERNAME";
/// Environment override for the Rackspace API key
pub const API_KEY_ENV: &str = "CLOUDPROBE_API_KEY";
/// Environment override for the OpenStack password
pub const PASSWORD_ENV: &str = "CLOUDPROBE_PASSWORD";

/// Resolves credential values read from provider profiles
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialStore;

impl CredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// Retrieve a credential value
    ///
    /// Resolution order:
    /// 1. Check environment variable (if env_var provided)
    /// 2. If value starts with "keyring:", retrieve from keyring
    /// 3. Otherwise, return the value as-is (plaintext)
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(env_value) = env::var(var)
        {
            return Ok(env_value);
        }

        if let Some(key) = value.strip_prefix(KEYRING_PREFIX) {
            #[cfg(feature = "secure-storage")]
            {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
                entry.get_password().map_err(|e| {
                    ConfigError::KeyringError(format!(
                        "Failed to retrieve credential '{}' from keyring: {}",
                        key, e
                    ))
                })
            }
            #[cfg(not(feature = "secure-storage"))]
            {
                Err(ConfigError::CredentialError(format!(
                    "Credential '{}' references keyring but secure-storage feature is not enabled",
                    key
                )))
            }
        } else {
            Ok(value.to_string())
        }
    }

    /// Check if a value is a keyring reference
    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_value_passes_through() {
        let store = CredentialStore::new();
        let result = store.get_credential("my-api-key", None).unwrap();
        assert_eq!(result, "my-api-key");
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_override() {
        unsafe {
            env::set_var("CLOUDPROBE_TEST_CREDENTIAL", "env-value");
        }

        let store = CredentialStore::new();
        let result = store
            .get_credential("config-value", Some("CLOUDPROBE_TEST_CREDENTIAL"))
            .unwrap();
        assert_eq!(result, "env-value");

        unsafe {
            env::remove_var("CLOUDPROBE_TEST_CREDENTIAL");
        }
    }

    #[test]
    fn test_keyring_reference_detection() {
        assert!(CredentialStore::is_keyring_reference("keyring:my-key"));
        assert!(!CredentialStore::is_keyring_reference("my-key"));
        assert!(!CredentialStore::is_keyring_reference(""));
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_keyring_reference_without_feature_is_an_error() {
        let store = CredentialStore::new();
        let err = store.get_credential("keyring:rackspace", None).unwrap_err();
        assert!(err.to_string().contains("secure-storage"));
    }
}
