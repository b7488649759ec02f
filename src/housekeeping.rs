//! One housekeeping pass
//!
//! Composes the gateway and the reconciler: fetch the board, compute
//! the intent batch for today, apply it. No retries — a failed fetch or
//! apply aborts the pass and propagates.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::gateway::{Gateway, TransportError};
use crate::reconcile::Reconciler;

/// Runs reconciliation passes against one project.
pub struct Housekeeper<G> {
    gateway: G,
    reconciler: Reconciler,
    project_id: String,
}

impl<G: Gateway> Housekeeper<G> {
    pub fn new(gateway: G, reconciler: Reconciler, project_id: impl Into<String>) -> Self {
        Self {
            gateway,
            reconciler,
            project_id: project_id.into(),
        }
    }

    /// The underlying gateway (used by tests to inspect applied batches).
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run one pass against today's date.
    pub async fn run_once(&self) -> Result<(), TransportError> {
        self.run_once_at(Local::now().date_naive()).await
    }

    /// Run one pass as-of a specific date.
    pub async fn run_once_at(&self, today: NaiveDate) -> Result<(), TransportError> {
        info!(project_id = %self.project_id, %today, "starting housekeeping");

        let snapshot = self.gateway.fetch(&self.project_id).await?;
        let intents = self.reconciler.compute(snapshot, today);
        self.gateway.apply(&intents).await?;

        info!("housekeeping complete");
        Ok(())
    }
}
