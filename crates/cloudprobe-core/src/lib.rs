//! # cloudprobe-core
//!
//! Library behind the `cloudprobe` binary: issue one read operation against a
//! cloud provider and present the outcome.
//!
//! The flow for every invocation is the same:
//!
//! 1. [`Config`] resolves a named provider profile into a [`ProviderConfig`]
//! 2. [`ClientFactory`] builds a [`ScopedClient`] for the capability the
//!    operation needs, wiring in an [`EventSink`] for client log events
//! 3. [`invoke`] runs the [`Operation`] and hands the rendered result or the
//!    error to a [`Reporter`]
//!
//! ```rust,no_run
//! use cloudprobe_core::{
//!     ClientFactory, Config, Operation, TracingReporter, TracingSink, invoke,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let provider = config.provider_config("rackspace", 0)?;
//! let operation = Operation::GetFlavors;
//! let client = ClientFactory::new(TracingSink).create(provider, operation.capability())?;
//! invoke(&client, &operation, &TracingReporter).await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod invoke;
pub mod provider;
pub mod render;
pub mod types;

pub use client::{ComputeClient, DatabaseClient, OrchestrationClient};
pub use config::{Config, ConfigError, ProviderConfig};
pub use error::{CoreError, Result};
pub use events::{ClientEvent, EventSink, NullSink, TracingSink};
pub use factory::{ClientFactory, ScopedClient};
pub use invoke::{Operation, Outcome, Reporter, TracingReporter, invoke};
pub use provider::{Capability, ProviderKind};
pub use render::Rendered;
pub use types::{ApiVersion, Flavor, ResourceTemplate, Server};
