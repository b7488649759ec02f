//! Todoist Sync v9 gateway implementation
//!
//! One POST to `/sync` pulls the live board; archived/completed items
//! are paged in per section from `/archive/items`. Mutations go back as
//! a single `commands` batch in one request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use super::{Gateway, TransportError};
use crate::domain::{Section, Snapshot, Task};
use crate::intent::MutationIntent;

const DEFAULT_BASE_URL: &str = "https://api.todoist.com/sync/v9";

/// Request timeout for both fetch and apply
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway backed by the Todoist Sync v9 API.
pub struct TodoistGateway {
    api_token: String,
    base_url: String,
    http: Client,
}

impl TodoistGateway {
    pub fn new(api_token: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_base_url(api_token, DEFAULT_BASE_URL)
    }

    /// Point the gateway at a different base URL (tests, mock servers)
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::Network)?;

        Ok(Self {
            api_token: api_token.into(),
            base_url: base_url.into(),
            http,
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    /// Pull archived/completed items for one section.
    async fn fetch_archived_items(&self, section_id: &str) -> Result<Vec<Task>, TransportError> {
        let url = format!("{}/archive/items?section_id={}", self.base_url, section_id);
        debug!(%section_id, "fetch_archived_items: requesting");

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(TransportError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api { status, message });
        }

        let archive: ArchivedItemsResponse = response.json().await?;
        Ok(archive.items)
    }
}

#[async_trait]
impl Gateway for TodoistGateway {
    async fn fetch(&self, project_id: &str) -> Result<Snapshot, TransportError> {
        debug!(%project_id, "fetch: called");
        let url = format!("{}/sync", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer())
            .form(&[
                ("sync_token", "*"),
                ("resource_types", r#"["projects", "sections", "items"]"#),
            ])
            .send()
            .await
            .map_err(TransportError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Api { status, message });
        }

        let sync: SyncResponse = response.json().await?;
        let mut tasks = sync.items;

        // The sync payload only carries live items; archived ones still
        // count toward section spend, so pull them per section
        for section in &sync.sections {
            let archived = self.fetch_archived_items(&section.id).await?;
            tasks.extend(archived);
        }

        let snapshot = filter_project(sync.sections, tasks, project_id);
        info!(
            sections = snapshot.sections.len(),
            tasks = snapshot.tasks.len(),
            "fetch: snapshot ready"
        );
        Ok(snapshot)
    }

    async fn apply(&self, intents: &[MutationIntent]) -> Result<(), TransportError> {
        debug!(count = intents.len(), "apply: called");
        let url = format!("{}/sync", self.base_url);

        let mut commands = Vec::with_capacity(intents.len());
        for intent in intents {
            info!(uuid = %intent.uuid(), kind = %intent.kind(), "queueing command");
            commands.push(to_command(intent));
        }
        let payload = serde_json::to_string(&commands)?;

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer())
            .form(&[("commands", payload.as_str())])
            .send()
            .await
            .map_err(TransportError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(%url, status, body = %message, "apply: update failed");
            return Err(TransportError::Api { status, message });
        }

        let body = response.text().await.unwrap_or_default();
        info!(result = %body, "apply: update complete");
        Ok(())
    }
}

/// Keep only the sections and tasks belonging to the given project.
fn filter_project(sections: Vec<Section>, tasks: Vec<Task>, project_id: &str) -> Snapshot {
    Snapshot::new(
        sections.into_iter().filter(|s| s.project_id == project_id).collect(),
        tasks.into_iter().filter(|t| t.project_id == project_id).collect(),
    )
}

/// Encode an intent as a Sync API command object.
fn to_command(intent: &MutationIntent) -> serde_json::Value {
    match intent {
        MutationIntent::CreateSection {
            uuid,
            temp_id,
            name,
            project_id,
        } => json!({
            "type": "section_add",
            "temp_id": temp_id,
            "uuid": uuid,
            "args": {"name": name, "project_id": project_id},
        }),
        MutationIntent::RelocateTask {
            uuid,
            task_id,
            section_id,
        } => json!({
            "type": "item_move",
            "uuid": uuid,
            "args": {"id": task_id, "section_id": section_id},
        }),
        MutationIntent::ReorderSections { uuid, order } => json!({
            "type": "section_reorder",
            "uuid": uuid,
            "args": {"sections": order},
        }),
        MutationIntent::RenameSection {
            uuid,
            section_id,
            name,
        } => json!({
            "type": "section_update",
            "uuid": uuid,
            "args": {"id": section_id, "name": name},
        }),
        MutationIntent::ArchiveSection { uuid, section_id } => json!({
            "type": "section_archive",
            "uuid": uuid,
            "args": {"id": section_id},
        }),
    }
}

// Sync API response shapes

#[derive(Debug, Deserialize)]
struct SyncResponse {
    #[serde(default)]
    sections: Vec<Section>,
    #[serde(default)]
    items: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct ArchivedItemsResponse {
    #[serde(default)]
    items: Vec<Task>,
}
