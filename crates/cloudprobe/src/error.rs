//! Error types for cloudprobe
//!
//! Only setup failures surface here. Once a request has been issued its
//! outcome is reported through the logger and never becomes a `CliError`.

use cloudprobe_core::{ConfigError, CoreError};
use thiserror::Error;

/// Failure before the remote operation could be issued
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Core(#[from] CoreError),
}

/// Result type for cloudprobe setup
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CliError::Config(ConfigError::ProfileNotFound { name, .. }) => vec![
                format!("Add a [providers.{}] table to the config file", name),
                "Point at another file with --config-file or CLOUDPROBE_CONFIG_FILE".to_string(),
            ],
            CliError::Config(ConfigError::VariantNotFound { name, .. }) => vec![format!(
                "Add another [[providers.{}.accounts]] entry or pick a lower --variant",
                name
            )],
            CliError::Config(ConfigError::MissingField { name, field }) => {
                vec![format!("Set {} in [providers.{}]", field, name)]
            }
            CliError::Config(ConfigError::ParseError(_)) => {
                vec!["Check the config file for TOML syntax errors".to_string()]
            }
            _ => vec![],
        }
    }

    /// Format error with suggestions
    pub fn display_with_suggestions(&self) -> String {
        let mut output = format!("error: {}", self);

        for suggestion in self.suggestions() {
            output.push_str(&format!("\n  tip: {}", suggestion));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_not_found_has_tips() {
        let err = CliError::from(ConfigError::ProfileNotFound {
            name: "hp".to_string(),
            suggestion: "Available profiles: rackspace.".to_string(),
        });
        let rendered = err.display_with_suggestions();
        assert!(
            rendered.starts_with("error: Configuration error: Provider profile 'hp' not found")
        );
        assert!(rendered.contains("tip: Add a [providers.hp] table"));
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = CliError::from(CoreError::Decode("bad body".to_string()));
        assert_eq!(err.to_string(), "Failed to decode response: bad body");
        assert!(err.suggestions().is_empty());
    }
}
