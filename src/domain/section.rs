//! Section domain type
//!
//! A named, ordered bucket of tasks under a project. Monthly sections
//! carry a "Month Year (£spent / £budget)" name; the Backlog section is
//! the evergreen catch-all.

use serde::{Deserialize, Serialize};

/// A section on the remote board.
///
/// The id is stable once the remote system has created the section. A
/// section created during the current pass carries a generated temp id
/// instead; the Sync API resolves temp ids within the same command
/// batch, so later intents may reference it freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Remote id, or a temp id for sections created this pass
    pub id: String,

    /// Display name ("March 2025 (£120.00 / £500)", "Backlog", ...)
    pub name: String,

    /// Owning project
    pub project_id: String,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_id: project_id.into(),
        }
    }
}

/// Normalized form used at every name comparison site: lowercase, trimmed.
///
/// All prefix matching against canonical labels goes through this one
/// function so the comparison rules cannot drift between phases.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive prefix match between a section name and a canonical label.
pub fn name_matches_label(name: &str, label: &str) -> bool {
    normalize(name).starts_with(&normalize(label))
}
