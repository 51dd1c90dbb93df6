//! CLI structure and command definitions
//!
//! Every command maps to exactly one remote read operation. Arguments are
//! positional; the only options select the config file and account variant.

use clap::{Parser, Subcommand};
use cloudprobe_core::{Operation, ProviderKind};
use std::path::PathBuf;

/// Invoke one read operation against a cloud provider and log the result
#[derive(Parser, Debug)]
#[command(name = "cloudprobe")]
#[command(
    version,
    about = "Invoke one read operation against a cloud provider and log the result",
    arg_required_else_help = true
)]
#[command(long_about = "
Invoke one read operation against a cloud provider and log the result

Provider names refer to [providers.<name>] tables in the config file.

EXAMPLES:
    cloudprobe get-server rackspace 9f3c2a1e-5b1d-4c8e-a7f0-2d6b8e4f1a90
    cloudprobe get-resource-template openstack OS::Nova::Server
    cloudprobe get-version openstack
    cloudprobe get-flavors

Log verbosity is read from CLOUDPROBE_LOG_LEVEL (default: debug).
")]
pub struct Cli {
    /// Path to alternate configuration file
    #[arg(long, global = true, env = "CLOUDPROBE_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Index of the account to use within the provider profile
    #[arg(long, global = true, default_value_t = 0)]
    pub variant: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a compute server by id
    GetServer {
        /// Provider profile name
        provider: String,
        /// Server id
        server_id: String,
    },

    /// Fetch the template of an orchestration resource type
    GetResourceTemplate {
        /// Provider profile name
        provider: String,
        /// Resource type, e.g. OS::Nova::Server
        resource_type: String,
    },

    /// Show the current orchestration API version
    GetVersion {
        /// Provider profile name
        provider: String,
    },

    /// List database flavors, smallest RAM first
    GetFlavors {
        /// Provider profile name (defaults to the first Rackspace profile)
        provider: Option<String>,
    },
}

impl Commands {
    /// Provider profile named on the command line, if any
    pub fn provider(&self) -> Option<&str> {
        match self {
            Commands::GetServer { provider, .. }
            | Commands::GetResourceTemplate { provider, .. }
            | Commands::GetVersion { provider } => Some(provider.as_str()),
            Commands::GetFlavors { provider } => provider.as_deref(),
        }
    }

    /// Provider kind to fall back to when no profile is named
    pub fn preferred_kind(&self) -> Option<ProviderKind> {
        match self {
            Commands::GetFlavors { .. } => Some(ProviderKind::Rackspace),
            _ => None,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Commands::GetServer { server_id, .. } => Operation::GetServer {
                server_id: server_id.clone(),
            },
            Commands::GetResourceTemplate { resource_type, .. } => {
                Operation::GetResourceTemplate {
                    resource_type: resource_type.clone(),
                }
            }
            Commands::GetVersion { .. } => Operation::GetVersion,
            Commands::GetFlavors { .. } => Operation::GetFlavors,
        }
    }
}
