//! Task domain type

use serde::{Deserialize, Serialize};

/// A unit of work belonging to at most one section.
///
/// The reconciler never creates or destroys tasks; the only mutation it
/// performs is updating `section_id` when a task is relocated out of an
/// archived section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    /// Free text; may embed a £-prefixed cost token ("Rent £450.00")
    pub content: String,

    /// Owning section; Todoist allows sectionless tasks
    pub section_id: Option<String>,

    /// Completion flag (Sync API: `checked`)
    #[serde(default)]
    pub checked: bool,

    /// Soft-deletion flag
    #[serde(default)]
    pub is_deleted: bool,

    pub project_id: String,
}

impl Task {
    pub fn new(id: impl Into<String>, content: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            section_id: None,
            checked: false,
            is_deleted: false,
            project_id: project_id.into(),
        }
    }

    /// Builder method to assign the task to a section
    pub fn in_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    /// Builder method to mark the task completed
    pub fn completed(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Builder method to mark the task soft-deleted
    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    /// Whether the task is still in flight (neither completed nor deleted)
    pub fn is_open(&self) -> bool {
        !self.checked && !self.is_deleted
    }
}
