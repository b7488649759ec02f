//! Mutation intents
//!
//! The reconciler's output: an ordered batch of remote-state-changing
//! instructions. Each intent carries a generated operation uuid so the
//! remote system can deduplicate and so log lines are traceable.
//!
//! Order is significant: creations come before relocations, relocations
//! before the reorder, the reorder before renames. Later intents may
//! reference sections created earlier in the same batch via their temp id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// (section id, 1-based position) pair for the reorder intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPosition {
    pub id: String,
    pub section_order: u32,
}

/// A single remote-state-changing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationIntent {
    /// Create a section; `temp_id` stands in for the real id until the
    /// remote system assigns one
    CreateSection {
        uuid: String,
        temp_id: String,
        name: String,
        project_id: String,
    },

    /// Move a task into another section
    RelocateTask {
        uuid: String,
        task_id: String,
        section_id: String,
    },

    /// Force the full board ordering in one shot
    ReorderSections {
        uuid: String,
        order: Vec<SectionPosition>,
    },

    /// Replace a section's display name
    RenameSection {
        uuid: String,
        section_id: String,
        name: String,
    },

    /// Soft-remove a section (remote keeps its history)
    ArchiveSection { uuid: String, section_id: String },
}

fn op_uuid() -> String {
    Uuid::new_v4().to_string()
}

impl MutationIntent {
    pub fn create_section(temp_id: impl Into<String>, name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self::CreateSection {
            uuid: op_uuid(),
            temp_id: temp_id.into(),
            name: name.into(),
            project_id: project_id.into(),
        }
    }

    pub fn relocate_task(task_id: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self::RelocateTask {
            uuid: op_uuid(),
            task_id: task_id.into(),
            section_id: section_id.into(),
        }
    }

    pub fn reorder_sections(order: Vec<SectionPosition>) -> Self {
        Self::ReorderSections { uuid: op_uuid(), order }
    }

    pub fn rename_section(section_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RenameSection {
            uuid: op_uuid(),
            section_id: section_id.into(),
            name: name.into(),
        }
    }

    pub fn archive_section(section_id: impl Into<String>) -> Self {
        Self::ArchiveSection {
            uuid: op_uuid(),
            section_id: section_id.into(),
        }
    }

    /// The operation uuid carried by every intent
    pub fn uuid(&self) -> &str {
        match self {
            Self::CreateSection { uuid, .. }
            | Self::RelocateTask { uuid, .. }
            | Self::ReorderSections { uuid, .. }
            | Self::RenameSection { uuid, .. }
            | Self::ArchiveSection { uuid, .. } => uuid,
        }
    }

    /// Short kind name for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateSection { .. } => "create_section",
            Self::RelocateTask { .. } => "relocate_task",
            Self::ReorderSections { .. } => "reorder_sections",
            Self::RenameSection { .. } => "rename_section",
            Self::ArchiveSection { .. } => "archive_section",
        }
    }
}

/// Generate a temp id for a section created within the current batch
pub fn temp_section_id() -> String {
    Uuid::new_v4().to_string()
}
