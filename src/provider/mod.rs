//! Provider layer
//!
//! Binds the API client to the three capabilities an orchestrator drives:
//!
//! - [`Reconcilable`] - lifecycle of a managed resource ([`database`])
//! - [`Listable`] - read-only snapshot ([`databases`])
//! - [`Invocable`] - imperative action ([`populate`])
//!
//! The layer knows nothing about any host protocol; an adapter (such as the
//! `bdcc` binary) calls these traits directly.

pub mod database;
pub mod databases;
pub mod diagnostics;
pub mod populate;

use crate::api::credentials::parse_host;
use crate::api::{ApiKey, BdccClient, Credentials};
use crate::config::ProviderConfig;
use crate::error::{ConfigError, OperationError};
use std::future::Future;
use std::sync::Arc;

pub use database::{DatabasePlan, DatabaseResource, DatabaseState};
pub use databases::{DatabasesDataSource, DatabasesState};
pub use diagnostics::Diagnostic;
pub use populate::{Pacing, Pause, PopulateAction, PopulateConfig, TokioPause};

/// Prefix of every resource, data source and action type name
pub const PROVIDER_TYPE_NAME: &str = "bobsdiscountcloudco";

/// A managed resource with a create/read/update/delete lifecycle
pub trait Reconcilable {
    type Plan;
    type State;

    fn create(
        &self,
        plan: &Self::Plan,
    ) -> impl Future<Output = Result<Self::State, OperationError>> + Send;

    /// Refresh `state` from the backend. On failure the caller keeps its record.
    fn read(
        &self,
        state: &Self::State,
    ) -> impl Future<Output = Result<Self::State, OperationError>> + Send;

    fn update(
        &self,
        prior: &Self::State,
        plan: &Self::Plan,
    ) -> impl Future<Output = Result<Self::State, OperationError>> + Send;

    /// On success the caller discards its record; on failure it keeps it.
    fn delete(&self, state: &Self::State) -> impl Future<Output = Result<(), OperationError>> + Send;
}

/// A read-only data source
pub trait Listable {
    type State;

    fn list(&self) -> impl Future<Output = Result<Self::State, OperationError>> + Send;
}

/// An imperative action with no state of its own
pub trait Invocable {
    type Config;

    fn invoke(
        &self,
        config: &Self::Config,
    ) -> impl Future<Output = Result<(), OperationError>> + Send;
}

/// Configured provider: one shared client handed to every capability
#[derive(Clone)]
pub struct Provider {
    client: Arc<BdccClient>,
}

impl Provider {
    /// Validate settings and build the shared client.
    ///
    /// Every problem found is reported, each scoped to its attribute.
    pub fn configure(config: &ProviderConfig) -> Result<Self, Vec<Diagnostic>> {
        tracing::info!("Configuring bdcc client");

        let mut diagnostics = Vec::new();

        let api_key = ApiKey::new(config.api_key.clone().unwrap_or_default())
            .map_err(|e| diagnostics.push(config_diagnostic(&e)))
            .ok();

        let host = parse_host(config.host.as_deref())
            .map_err(|e| diagnostics.push(config_diagnostic(&e)))
            .ok();

        let (Some(host), Some(api_key)) = (host, api_key) else {
            return Err(diagnostics);
        };

        let credentials = Credentials::with_host(host, api_key);

        tracing::debug!(host = %credentials.host(), "Creating bdcc client");

        let client = BdccClient::new(credentials).map_err(|e| {
            vec![Diagnostic::error(
                "Unable to create API client",
                format!("An unexpected error occurred when creating the API client: {e}"),
            )]
        })?;

        tracing::info!(success = true, "Configured bdcc client");

        Ok(Self::from_client(Arc::new(client)))
    }

    pub fn from_client(client: Arc<BdccClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<BdccClient> {
        &self.client
    }

    pub fn database_resource(&self) -> DatabaseResource {
        DatabaseResource::new(Arc::clone(&self.client))
    }

    pub fn databases_data_source(&self) -> DatabasesDataSource {
        DatabasesDataSource::new(Arc::clone(&self.client))
    }

    pub fn populate_action(&self) -> PopulateAction {
        PopulateAction::new(Arc::clone(&self.client))
    }

    /// Type names of everything this provider exposes
    pub fn type_names() -> Vec<String> {
        vec![
            DatabaseResource::type_name(),
            DatabasesDataSource::type_name(),
            PopulateAction::type_name(),
        ]
    }
}

fn config_diagnostic(err: &ConfigError) -> Diagnostic {
    match err {
        ConfigError::MissingApiKey => Diagnostic::attribute(
            "api_key",
            "Missing API key",
            "The provider cannot create the API client as there is a missing or empty value \
             for the API key. Set the api_key value in the configuration or use the \
             BDCC_API_KEY environment variable.",
        ),
        ConfigError::InvalidHost { .. } => Diagnostic::attribute(
            "host",
            "Invalid API host",
            format!(
                "{err}. Set the host value in the configuration or use the BDCC_HOST \
                 environment variable."
            ),
        ),
    }
}
