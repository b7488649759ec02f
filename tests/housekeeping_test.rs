//! Integration tests for quidkeeper
//!
//! Drives full housekeeping passes against an in-memory mock gateway
//! that applies intent batches to a model board the way the remote
//! system would: creates add sections under their temp id, archives
//! drop sections from the live board, renames and relocations update in
//! place, reorders re-sort the section list.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use quidkeeper::{
    BACKLOG, Gateway, Housekeeper, MutationIntent, Reconciler, Section, Snapshot, Task, TransportError,
};

const PROJECT: &str = "p1";
const BUDGET: u32 = 500;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

// =============================================================================
// Mock gateway
// =============================================================================

#[derive(Default)]
struct MockGateway {
    board: Mutex<Snapshot>,
    batches: Mutex<Vec<Vec<MutationIntent>>>,
}

impl MockGateway {
    fn with_board(board: Snapshot) -> Self {
        Self {
            board: Mutex::new(board),
            batches: Mutex::new(Vec::new()),
        }
    }

    fn board(&self) -> Snapshot {
        self.board.lock().unwrap().clone()
    }

    fn batches(&self) -> Vec<Vec<MutationIntent>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn fetch(&self, _project_id: &str) -> Result<Snapshot, TransportError> {
        Ok(self.board())
    }

    async fn apply(&self, intents: &[MutationIntent]) -> Result<(), TransportError> {
        let mut board = self.board.lock().unwrap();
        for intent in intents {
            match intent {
                MutationIntent::CreateSection {
                    temp_id,
                    name,
                    project_id,
                    ..
                } => board.sections.push(Section::new(temp_id, name, project_id)),
                MutationIntent::RelocateTask {
                    task_id, section_id, ..
                } => {
                    if let Some(task) = board.tasks.iter_mut().find(|t| t.id == *task_id) {
                        task.section_id = Some(section_id.clone());
                    }
                }
                MutationIntent::ReorderSections { order, .. } => {
                    let positions: HashMap<&str, u32> =
                        order.iter().map(|p| (p.id.as_str(), p.section_order)).collect();
                    board
                        .sections
                        .sort_by_key(|s| positions.get(s.id.as_str()).copied().unwrap_or(u32::MAX));
                }
                MutationIntent::RenameSection {
                    section_id, name, ..
                } => {
                    if let Some(section) = board.sections.iter_mut().find(|s| s.id == *section_id) {
                        section.name = name.clone();
                    }
                }
                MutationIntent::ArchiveSection { section_id, .. } => {
                    board.sections.retain(|s| s.id != *section_id);
                }
            }
        }
        self.batches.lock().unwrap().push(intents.to_vec());
        Ok(())
    }
}

struct FailingGateway;

#[async_trait]
impl Gateway for FailingGateway {
    async fn fetch(&self, _project_id: &str) -> Result<Snapshot, TransportError> {
        Err(TransportError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn apply(&self, _intents: &[MutationIntent]) -> Result<(), TransportError> {
        panic!("apply must not be reached when fetch fails");
    }
}

fn housekeeper(gateway: MockGateway) -> Housekeeper<MockGateway> {
    Housekeeper::new(gateway, Reconciler::new(PROJECT, BUDGET), PROJECT)
}

fn count_kind(batch: &[MutationIntent], kind: &str) -> usize {
    batch.iter().filter(|i| i.kind() == kind).count()
}

// =============================================================================
// Passes over an empty project
// =============================================================================

#[tokio::test]
async fn test_empty_project_builds_full_board() {
    let keeper = housekeeper(MockGateway::default());
    keeper.run_once_at(today()).await.unwrap();

    let batches = keeper.gateway().batches();
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(count_kind(batch, "create_section"), 13);
    assert_eq!(count_kind(batch, "reorder_sections"), 1);
    assert_eq!(count_kind(batch, "archive_section"), 0);
    // Only Backlog's freshly created name differs from its computed title
    assert_eq!(count_kind(batch, "rename_section"), 1);

    let board = keeper.gateway().board();
    assert_eq!(board.sections.len(), 13);
    assert_eq!(board.sections[0].name, format!("March 2025 (£0.00 / £{})", BUDGET));
    assert_eq!(board.sections[1].name, BACKLOG);
    assert_eq!(board.sections[2].name, format!("April 2025 (£0.00 / £{})", BUDGET));
}

#[tokio::test]
async fn test_second_pass_is_idempotent() {
    let keeper = housekeeper(MockGateway::default());
    keeper.run_once_at(today()).await.unwrap();
    keeper.run_once_at(today()).await.unwrap();

    let batches = keeper.gateway().batches();
    assert_eq!(batches.len(), 2);
    let second = &batches[1];
    assert_eq!(count_kind(second, "create_section"), 0);
    assert_eq!(count_kind(second, "archive_section"), 0);
    assert_eq!(count_kind(second, "rename_section"), 0);
    assert_eq!(count_kind(second, "relocate_task"), 0);
    // The reorder is unconditional
    assert_eq!(count_kind(second, "reorder_sections"), 1);
    assert_eq!(second.len(), 1);
}

// =============================================================================
// Converging a messy board
// =============================================================================

#[tokio::test]
async fn test_messy_board_converges_in_one_pass() {
    let sections = vec![
        Section::new("s-backlog", "Backlog", PROJECT),
        Section::new("s-old", "Sprint 14", PROJECT),
        Section::new("s-march", "March 2025 (£0.00 / £500)", PROJECT),
    ];
    let tasks = vec![
        Task::new("t-rent", "Rent: £450.00!!", PROJECT).in_section("s-march"),
        Task::new("t-open", "Carry me over £25", PROJECT).in_section("s-old"),
        Task::new("t-done", "Already done £99", PROJECT).in_section("s-old").completed(),
    ];

    let keeper = housekeeper(MockGateway::with_board(Snapshot::new(sections, tasks)));
    keeper.run_once_at(today()).await.unwrap();

    let batch = &keeper.gateway().batches()[0];
    // 11 missing monthly sections (March and Backlog already exist)
    assert_eq!(count_kind(batch, "create_section"), 11);
    assert_eq!(count_kind(batch, "archive_section"), 1);
    assert_eq!(count_kind(batch, "relocate_task"), 1);

    let board = keeper.gateway().board();
    assert!(board.sections.iter().all(|s| s.name != "Sprint 14"));
    // March picked up its own rent plus the relocated task's £25
    assert_eq!(
        board.sections.iter().find(|s| s.id == "s-march").unwrap().name,
        "March 2025 (£475.00 / £500)"
    );
    let moved = board.tasks.iter().find(|t| t.id == "t-open").unwrap();
    assert_eq!(moved.section_id.as_deref(), Some("s-march"));
    // Completed task stays where it was
    let done = board.tasks.iter().find(|t| t.id == "t-done").unwrap();
    assert_eq!(done.section_id.as_deref(), Some("s-old"));

    // And the converged board needs nothing further
    keeper.run_once_at(today()).await.unwrap();
    let second = &keeper.gateway().batches()[1];
    assert_eq!(second.len(), 1);
    assert_eq!(count_kind(second, "reorder_sections"), 1);
}

#[tokio::test]
async fn test_overspent_current_month_gets_alarm_title() {
    let sections = vec![Section::new("s-march", "March 2025 (£0.00 / £500)", PROJECT)];
    let tasks = vec![Task::new("t-big", "Car repair £550", PROJECT).in_section("s-march")];

    let keeper = housekeeper(MockGateway::with_board(Snapshot::new(sections, tasks)));
    keeper.run_once_at(today()).await.unwrap();

    let board = keeper.gateway().board();
    assert_eq!(
        board.sections.iter().find(|s| s.id == "s-march").unwrap().name,
        "March 2025 !!! £550.00 / £500 !!!"
    );
}

// =============================================================================
// Error propagation
// =============================================================================

#[tokio::test]
async fn test_fetch_failure_aborts_pass() {
    let keeper = Housekeeper::new(FailingGateway, Reconciler::new(PROJECT, BUDGET), PROJECT);
    let err = keeper.run_once_at(today()).await.unwrap_err();
    assert!(matches!(err, TransportError::Api { status: 503, .. }));
}
