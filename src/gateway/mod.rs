//! Remote state gateway
//!
//! The seam between the pure reconciler and the remote task board. The
//! [`Gateway`] trait is what the housekeeping pass consumes; the
//! [`TodoistGateway`] implementation speaks the Todoist Sync v9 API.

mod error;
mod todoist;

pub use error::TransportError;
pub use todoist::TodoistGateway;

use async_trait::async_trait;

use crate::domain::Snapshot;
use crate::intent::MutationIntent;

/// Fetches board state and applies mutation batches.
///
/// Owns authentication and error surfacing. `apply` submits the whole
/// batch in one logical request, in order, with no partial-completion
/// reporting; any non-success response propagates as a
/// [`TransportError`].
#[async_trait]
pub trait Gateway: Send + Sync {
    /// All sections and tasks under the given project, including
    /// archived/completed tasks.
    async fn fetch(&self, project_id: &str) -> Result<Snapshot, TransportError>;

    /// Submit the intents for execution in the given order.
    async fn apply(&self, intents: &[MutationIntent]) -> Result<(), TransportError>;
}
