//! One remote read operation and the presentation of its outcome
//!
//! [`invoke`] runs exactly one [`Operation`] against a [`ScopedClient`] and
//! reports either the rendered result or the error, never both, through the
//! [`Reporter`] it is handed. Errors stop there: the caller only learns the
//! [`Outcome`].

use tracing::{debug, error, info};

use crate::error::{CoreError, Result};
use crate::factory::ScopedClient;
use crate::provider::Capability;
use crate::render::{Rendered, render_document, render_flavors};

/// The read operations cloudprobe can issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetServer { server_id: String },
    GetResourceTemplate { resource_type: String },
    GetVersion,
    GetFlavors,
}

impl Operation {
    /// Capability the client must be scoped to
    pub fn capability(&self) -> Capability {
        match self {
            Operation::GetServer { .. } => Capability::Compute,
            Operation::GetResourceTemplate { .. } | Operation::GetVersion => {
                Capability::Orchestration
            }
            Operation::GetFlavors => Capability::Database,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetServer { .. } => "get-server",
            Operation::GetResourceTemplate { .. } => "get-resource-template",
            Operation::GetVersion => "get-version",
            Operation::GetFlavors => "get-flavors",
        }
    }
}

/// Destination for the outcome of an invocation
pub trait Reporter: Send + Sync {
    fn result(&self, rendered: &Rendered);
    fn error(&self, err: &CoreError);
}

/// Logs results at INFO and errors at ERROR
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn result(&self, rendered: &Rendered) {
        for line in rendered.lines() {
            info!("{}", line);
        }
    }

    fn error(&self, err: &CoreError) {
        error!("{}", err);
    }
}

/// What happened to an invocation, after it was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Succeeded
    }
}

/// Run `operation` once and report its outcome
pub async fn invoke(
    client: &ScopedClient,
    operation: &Operation,
    reporter: &dyn Reporter,
) -> Outcome {
    debug!(operation = operation.name(), "Invoking operation");

    match execute(client, operation).await {
        Ok(rendered) => {
            reporter.result(&rendered);
            Outcome::Succeeded
        }
        Err(err) => {
            reporter.error(&err);
            Outcome::Failed
        }
    }
}

async fn execute(client: &ScopedClient, operation: &Operation) -> Result<Rendered> {
    match (client, operation) {
        (ScopedClient::Compute(compute), Operation::GetServer { server_id }) => {
            render_document(&compute.get_server(server_id).await?)
        }
        (
            ScopedClient::Orchestration(orchestration),
            Operation::GetResourceTemplate { resource_type },
        ) => render_document(&orchestration.get_resource_template(resource_type).await?),
        (ScopedClient::Orchestration(orchestration), Operation::GetVersion) => {
            render_document(&orchestration.get_version().await?)
        }
        (ScopedClient::Database(database), Operation::GetFlavors) => {
            Ok(render_flavors(database.get_flavors().await?))
        }
        _ => Err(CoreError::CapabilityMismatch {
            expected: operation.capability(),
            actual: client.capability(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ComputeClient, DatabaseClient};
    use crate::types::{Flavor, Server};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records every report for later assertions
    #[derive(Default)]
    struct RecordingReporter {
        results: Mutex<Vec<Rendered>>,
        errors: Mutex<Vec<String>>,
    }

    impl Reporter for RecordingReporter {
        fn result(&self, rendered: &Rendered) {
            self.results.lock().unwrap().push(rendered.clone());
        }

        fn error(&self, err: &CoreError) {
            self.errors.lock().unwrap().push(err.to_string());
        }
    }

    struct StaticCompute(std::result::Result<Server, u16>);

    #[async_trait]
    impl ComputeClient for StaticCompute {
        async fn get_server(&self, _server_id: &str) -> Result<Server> {
            match &self.0 {
                Ok(server) => Ok(server.clone()),
                Err(status) => Err(CoreError::Api {
                    status: *status,
                    message: "not found".to_string(),
                }),
            }
        }
    }

    struct StaticFlavors(Vec<Flavor>);

    #[async_trait]
    impl DatabaseClient for StaticFlavors {
        async fn get_flavors(&self) -> Result<Vec<Flavor>> {
            Ok(self.0.clone())
        }
    }

    fn server() -> Server {
        Server {
            id: "srv-1".to_string(),
            name: "web-01".to_string(),
            status: Some("ACTIVE".to_string()),
            progress: Some(100),
            host_id: None,
            flavor: None,
            image: None,
            addresses: BTreeMap::new(),
            metadata: BTreeMap::new(),
            created: None,
            updated: None,
        }
    }

    fn get_server() -> Operation {
        Operation::GetServer {
            server_id: "srv-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_reports_exactly_one_result() {
        let client = ScopedClient::Compute(Box::new(StaticCompute(Ok(server()))));
        let reporter = RecordingReporter::default();

        let outcome = invoke(&client, &get_server(), &reporter).await;

        assert!(outcome.is_success());
        let results = reporter.results.lock().unwrap();
        assert_eq!(results.len(), 1);
        assert!(reporter.errors.lock().unwrap().is_empty());
        match &results[0] {
            Rendered::Document(doc) => assert_eq!(doc["name"], "web-01"),
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found_reports_exactly_one_error() {
        let client = ScopedClient::Compute(Box::new(StaticCompute(Err(404))));
        let reporter = RecordingReporter::default();

        let outcome = invoke(&client, &get_server(), &reporter).await;

        assert_eq!(outcome, Outcome::Failed);
        assert!(reporter.results.lock().unwrap().is_empty());
        let errors = reporter.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not found"), "{}", errors[0]);
    }

    #[tokio::test]
    async fn test_flavor_scenario_orders_by_ram() {
        let client = ScopedClient::Database(Box::new(StaticFlavors(vec![
            Flavor {
                id: "1".to_string(),
                name: "A".to_string(),
                ram: 512,
            },
            Flavor {
                id: "2".to_string(),
                name: "B".to_string(),
                ram: 256,
            },
        ])));
        let reporter = RecordingReporter::default();

        invoke(&client, &Operation::GetFlavors, &reporter).await;

        let results = reporter.results.lock().unwrap();
        assert_eq!(
            results[0].lines(),
            vec!["2", "\tB", "1", "\tA"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_repeated_invocation_renders_identically() {
        let client = ScopedClient::Compute(Box::new(StaticCompute(Ok(server()))));
        let first = RecordingReporter::default();
        let second = RecordingReporter::default();

        invoke(&client, &get_server(), &first).await;
        invoke(&client, &get_server(), &second).await;

        assert_eq!(
            *first.results.lock().unwrap(),
            *second.results.lock().unwrap()
        );
    }

    #[tokio::test]
    async fn test_operation_against_wrong_capability_is_reported() {
        let client = ScopedClient::Database(Box::new(StaticFlavors(Vec::new())));
        let reporter = RecordingReporter::default();

        let outcome = invoke(&client, &Operation::GetVersion, &reporter).await;

        assert_eq!(outcome, Outcome::Failed);
        let errors = reporter.errors.lock().unwrap();
        assert_eq!(
            errors[0],
            "Operation requires the orchestration capability but the client is scoped to database"
        );
    }

    #[test]
    fn test_operation_capabilities() {
        assert_eq!(get_server().capability(), Capability::Compute);
        assert_eq!(Operation::GetVersion.capability(), Capability::Orchestration);
        assert_eq!(Operation::GetFlavors.capability(), Capability::Database);
    }
}
