//! Domain types for quidkeeper
//!
//! Core domain types: Section, Task, Snapshot.
//! These deserialize directly from the Todoist Sync v9 resource shapes,
//! so field names follow the wire format.

mod section;
mod task;

pub use section::{Section, name_matches_label, normalize};
pub use task::Task;

use serde::{Deserialize, Serialize};

/// One pass's working set: everything the reconciler needs to know
/// about the remote board.
///
/// Owned exclusively by the reconciler for the duration of a pass.
/// Sections are in board order; tasks include archived/completed ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub sections: Vec<Section>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn new(sections: Vec<Section>, tasks: Vec<Task>) -> Self {
        Self { sections, tasks }
    }
}
