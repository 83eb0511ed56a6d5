//! Population action
//!
//! Writes an ordered list of key/value items into one database. The run is
//! paced (a warm-up pause, then a fixed interval between writes) and stops at
//! the first failing write. Items written before the failure stay written.

use super::{Invocable, PROVIDER_TYPE_NAME};
use crate::api::{BdccClient, DatabaseItem};
use crate::error::{BdccError, OperationError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Pause before the first write
pub const DEFAULT_WARM_UP: Duration = Duration::from_secs(10);

/// Pause between consecutive writes
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Fixed pacing schedule for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub warm_up: Duration,
    pub interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            warm_up: DEFAULT_WARM_UP,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Something that can wait for a duration
pub trait Pause: Send + Sync {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Waits on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Input of one population run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateConfig {
    /// Target database id
    pub id: String,
    pub items: Vec<DatabaseItem>,
}

/// The `<provider>_population_action` action
#[derive(Clone)]
pub struct PopulateAction<P = TokioPause> {
    client: Arc<BdccClient>,
    pacing: Pacing,
    pause: P,
}

impl PopulateAction {
    pub const TYPE_SUFFIX: &'static str = "population_action";

    pub fn new(client: Arc<BdccClient>) -> Self {
        Self {
            client,
            pacing: Pacing::default(),
            pause: TokioPause,
        }
    }

    pub fn type_name() -> String {
        format!("{}_{}", PROVIDER_TYPE_NAME, Self::TYPE_SUFFIX)
    }
}

impl<P: Pause> PopulateAction<P> {
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Swap the waiting strategy, keeping client and pacing
    pub fn with_pause<Q: Pause>(self, pause: Q) -> PopulateAction<Q> {
        PopulateAction {
            client: self.client,
            pacing: self.pacing,
            pause,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Write `items` in order. Fails with [`BdccError::Sequence`] at the first
    /// failing write; nothing after it is attempted and nothing is rolled back.
    pub async fn populate(&self, database_id: &str, items: &[DatabaseItem]) -> Result<()> {
        tracing::info!(
            database_id,
            items = items.len(),
            "Populating database, waiting {:?} before first write",
            self.pacing.warm_up
        );
        self.pause.pause(self.pacing.warm_up).await;

        for (position, item) in items.iter().enumerate() {
            if position > 0 {
                self.pause.pause(self.pacing.interval).await;
            }

            self.client
                .create_item(database_id, &item.key, &item.value)
                .await
                .map_err(|source| {
                    tracing::error!(database_id, position, key = %item.key, "Item write failed");
                    BdccError::Sequence {
                        position,
                        source: Box::new(source),
                    }
                })?;

            tracing::debug!(database_id, position, key = %item.key, "Item written");
        }

        tracing::info!(database_id, items = items.len(), "Population complete");
        Ok(())
    }
}

impl<P: Pause> Invocable for PopulateAction<P> {
    type Config = PopulateConfig;

    async fn invoke(&self, config: &PopulateConfig) -> Result<(), OperationError> {
        self.populate(&config.id, &config.items)
            .await
            .map_err(|e| OperationError::new("Error populating database", e))
    }
}
