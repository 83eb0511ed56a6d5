//! Database resource
//!
//! Maps create/read/update/delete onto the backend. Ids and names in state always
//! come from backend responses so server-side canonicalization is preserved.

use super::{Reconcilable, PROVIDER_TYPE_NAME};
use crate::api::BdccClient;
use crate::error::OperationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Layout of `last_updated` (RFC 850, e.g. `Monday, 02-Jan-06 15:04:05 UTC`)
pub const LAST_UPDATED_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

/// Desired configuration of a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabasePlan {
    pub name: String,
}

/// Persisted state of a managed database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseState {
    pub id: String,
    pub name: String,
    pub last_updated: String,
}

pub(crate) fn format_last_updated(at: DateTime<Utc>) -> String {
    at.format(LAST_UPDATED_FORMAT).to_string()
}

/// Reconciler for the `<provider>_database` resource
#[derive(Clone)]
pub struct DatabaseResource {
    client: Arc<BdccClient>,
}

impl DatabaseResource {
    pub const TYPE_SUFFIX: &'static str = "database";

    pub fn new(client: Arc<BdccClient>) -> Self {
        Self { client }
    }

    pub fn type_name() -> String {
        format!("{}_{}", PROVIDER_TYPE_NAME, Self::TYPE_SUFFIX)
    }
}

impl Reconcilable for DatabaseResource {
    type Plan = DatabasePlan;
    type State = DatabaseState;

    async fn create(&self, plan: &DatabasePlan) -> Result<DatabaseState, OperationError> {
        tracing::info!(name = %plan.name, "Creating database");

        let database = self
            .client
            .create_database(&plan.name)
            .await
            .map_err(|e| OperationError::new("Error creating database", e))?;

        tracing::info!(id = %database.id, name = %database.name, "Created database");

        Ok(DatabaseState {
            id: database.id,
            name: database.name,
            last_updated: format_last_updated(Utc::now()),
        })
    }

    async fn read(&self, state: &DatabaseState) -> Result<DatabaseState, OperationError> {
        tracing::debug!(id = %state.id, "Reading database");

        let database = self.client.get_database(&state.id).await.map_err(|e| {
            OperationError::new(format!("Error reading database {}", state.id), e)
        })?;

        Ok(DatabaseState {
            name: database.name,
            ..state.clone()
        })
    }

    /// The backend has no update endpoint, so this keeps the prior state as is.
    async fn update(
        &self,
        prior: &DatabaseState,
        plan: &DatabasePlan,
    ) -> Result<DatabaseState, OperationError> {
        if plan.name != prior.name {
            tracing::warn!(
                id = %prior.id,
                current = %prior.name,
                planned = %plan.name,
                "Database rename is not supported by the backend; keeping current name"
            );
        }
        Ok(prior.clone())
    }

    async fn delete(&self, state: &DatabaseState) -> Result<(), OperationError> {
        tracing::info!(id = %state.id, "Deleting database");

        self.client
            .delete_database(&state.id)
            .await
            .map_err(|e| OperationError::new("Error deleting database", e))
    }
}
