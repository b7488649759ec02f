//! Reconciler — the core decision logic
//!
//! Consumes a snapshot of the remote board plus the current date and
//! produces the ordered batch of mutation intents that brings the board
//! to its canonical state. No I/O happens here; the gateway applies the
//! batch afterwards.
//!
//! Phases run in a fixed order over one working set:
//!
//! 1. create sections for canonical labels with no match
//! 2. archive sections matching no label, relocating their open tasks
//! 3. enforce board ordering (unconditional)
//! 4. recompute titles from accumulated spend and rename where stale
//!
//! Phase 1 appends synthetic sections to the working set so the later
//! phases order and title them; phase 2 updates relocated tasks' homes
//! so phase 4 counts their spend in the right section.

mod cost;

pub use cost::{task_cost, total_cost};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::{Section, Snapshot, Task, name_matches_label};
use crate::intent::{MutationIntent, SectionPosition, temp_section_id};
use crate::schedule::{self, BACKLOG};

/// Pure decision logic for one housekeeping pass.
pub struct Reconciler {
    project_id: String,
    monthly_budget: u32,
}

impl Reconciler {
    pub fn new(project_id: impl Into<String>, monthly_budget: u32) -> Self {
        Self {
            project_id: project_id.into(),
            monthly_budget,
        }
    }

    /// Compute the full intent batch for the given snapshot and date.
    ///
    /// Takes the snapshot by value: it becomes the pass's working set
    /// and is mutated as phases build on each other's results.
    pub fn compute(&self, snapshot: Snapshot, today: NaiveDate) -> Vec<MutationIntent> {
        debug!(
            sections = snapshot.sections.len(),
            tasks = snapshot.tasks.len(),
            %today,
            "compute: starting pass"
        );
        let Snapshot { mut sections, mut tasks } = snapshot;
        let labels = schedule::canonical_labels(today);

        let mut intents = self.add_missing_sections(&mut sections, &labels);
        intents.extend(self.archive_unwanted_sections(&sections, &mut tasks, &labels, today));
        intents.push(self.section_order(&sections));
        intents.extend(self.section_titles(&sections, &tasks, today));

        info!(count = intents.len(), "compute: pass complete");
        intents
    }

    /// Phase 1: a section must exist for every canonical label.
    fn add_missing_sections(&self, sections: &mut Vec<Section>, labels: &[String]) -> Vec<MutationIntent> {
        let mut intents = Vec::new();
        let mut created = Vec::new();

        for label in labels {
            if sections.iter().any(|s| name_matches_label(&s.name, label)) {
                continue;
            }
            let name = format!("{} (£0.00 / £{})", label, self.monthly_budget);
            let temp_id = temp_section_id();
            info!(%name, %temp_id, "adding missing section");
            intents.push(MutationIntent::create_section(&temp_id, &name, &self.project_id));
            created.push(Section::new(temp_id, name, &self.project_id));
        }

        info!(count = intents.len(), "missing sections to add");
        sections.extend(created);
        intents
    }

    /// Phase 2: archive sections that match no canonical label.
    ///
    /// Open tasks move to the current-month section first so no
    /// in-flight work disappears with its bucket. When no current-month
    /// section exists the relocation is skipped with a warning rather
    /// than emitting an intent with no target.
    fn archive_unwanted_sections(
        &self,
        sections: &[Section],
        tasks: &mut [Task],
        labels: &[String],
        today: NaiveDate,
    ) -> Vec<MutationIntent> {
        let mut intents = Vec::new();
        let current_section_id = self.current_section_id(sections, today);

        for section in sections {
            if labels.iter().any(|label| name_matches_label(&section.name, label)) {
                continue;
            }

            let to_move: Vec<String> = tasks
                .iter()
                .filter(|t| t.section_id.as_deref() == Some(section.id.as_str()) && t.is_open())
                .map(|t| t.id.clone())
                .collect();
            info!(name = %section.name, tasks = to_move.len(), "archiving unwanted section");

            match &current_section_id {
                Some(target) => {
                    for task_id in &to_move {
                        intents.push(MutationIntent::relocate_task(task_id, target));
                    }
                    for task in tasks.iter_mut().filter(|t| to_move.contains(&t.id)) {
                        task.section_id = Some(target.clone());
                    }
                }
                None if !to_move.is_empty() => {
                    warn!(
                        name = %section.name,
                        tasks = to_move.len(),
                        "no current-month section to relocate tasks into, leaving them in place"
                    );
                }
                None => {}
            }

            intents.push(MutationIntent::archive_section(&section.id));
        }

        info!(count = intents.len(), "unwanted-section commands queued");
        intents
    }

    /// Phase 3: force the remote ordering to match the working set.
    ///
    /// Always emitted, even when the order already matches; re-applying
    /// the same order is a remote no-op.
    fn section_order(&self, sections: &[Section]) -> MutationIntent {
        let order: Vec<SectionPosition> = sections
            .iter()
            .enumerate()
            .map(|(idx, s)| SectionPosition {
                id: s.id.clone(),
                section_order: idx as u32 + 1,
            })
            .collect();
        debug!(count = order.len(), "section_order: built order map");
        MutationIntent::reorder_sections(order)
    }

    /// Phase 4: keep titles in sync with accumulated spend.
    fn section_titles(
        &self,
        sections: &[Section],
        tasks: &[Task],
        today: NaiveDate,
    ) -> Vec<MutationIntent> {
        let mut intents = Vec::new();
        let current_section_id = self.current_section_id(sections, today);

        for section in sections {
            let expected = if section.name.starts_with(BACKLOG) {
                BACKLOG.to_string()
            } else {
                let cost = total_cost(
                    tasks
                        .iter()
                        .filter(|t| t.section_id.as_deref() == Some(section.id.as_str())),
                );
                let head: Vec<&str> = section.name.split_whitespace().take(2).collect();
                let overspent =
                    current_section_id.as_deref() == Some(section.id.as_str()) && cost > f64::from(self.monthly_budget);
                if overspent {
                    format!("{} !!! £{:.2} / £{} !!!", head.join(" "), cost, self.monthly_budget)
                } else {
                    format!("{} (£{:.2} / £{})", head.join(" "), cost, self.monthly_budget)
                }
            };

            if expected != section.name {
                info!(from = %section.name, to = %expected, "renaming section");
                intents.push(MutationIntent::rename_section(&section.id, expected));
            }
        }

        info!(count = intents.len(), "sections to rename");
        intents
    }

    /// The working-set section holding the current month, if any.
    fn current_section_id(&self, sections: &[Section], today: NaiveDate) -> Option<String> {
        let label = schedule::current_month_label(today);
        sections
            .iter()
            .find(|s| name_matches_label(&s.name, &label))
            .map(|s| s.id.clone())
    }
}
