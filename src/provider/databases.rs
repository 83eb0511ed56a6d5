//! Databases data source

use super::{Listable, PROVIDER_TYPE_NAME};
use crate::api::{BdccClient, Database};
use crate::error::OperationError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of every database, in the order the backend returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabasesState {
    pub databases: Vec<Database>,
}

#[derive(Clone)]
pub struct DatabasesDataSource {
    client: Arc<BdccClient>,
}

impl DatabasesDataSource {
    pub const TYPE_SUFFIX: &'static str = "databases";

    pub fn new(client: Arc<BdccClient>) -> Self {
        Self { client }
    }

    pub fn type_name() -> String {
        format!("{}_{}", PROVIDER_TYPE_NAME, Self::TYPE_SUFFIX)
    }
}

impl Listable for DatabasesDataSource {
    type State = DatabasesState;

    async fn list(&self) -> Result<DatabasesState, OperationError> {
        let databases = self
            .client
            .list_databases()
            .await
            .map_err(|e| OperationError::new("Unable to list databases", e))?;

        tracing::debug!("Loaded {} databases", databases.len());

        Ok(DatabasesState { databases })
    }
}
