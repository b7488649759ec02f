//! Quidkeeper - rolling monthly budget housekeeping for a Todoist board
//!
//! A periodic housekeeping job that reconciles a Todoist project's
//! sections against a rolling 12-month budget schedule: one section per
//! month plus an evergreen Backlog, each monthly title carrying its
//! accumulated spend against the budget ("March 2025 (£120.00 / £500)").
//!
//! # How a pass works
//!
//! 1. The gateway pulls the full board (sections, tasks, archived items)
//! 2. The reconciler diffs it against the canonical schedule and emits
//!    an ordered batch of mutation intents (create, relocate, reorder,
//!    rename, archive)
//! 3. The gateway submits the batch as one Sync API request
//!
//! The reconciler is pure (no I/O) so the decision logic is fully
//! testable without a network.
//!
//! # Modules
//!
//! - [`reconcile`] - the core diffing/decision logic
//! - [`schedule`] - canonical rolling-window label derivation
//! - [`domain`] - Section, Task, Snapshot
//! - [`intent`] - mutation intent types
//! - [`gateway`] - Gateway trait and the Todoist Sync v9 client
//! - [`housekeeping`] - fetch → compute → apply composition
//! - [`config`] - environment-driven configuration

pub mod config;
pub mod domain;
pub mod gateway;
pub mod housekeeping;
pub mod intent;
pub mod reconcile;
pub mod schedule;

// Re-export commonly used types
pub use config::{Config, ConfigError, DEFAULT_MONTHLY_BUDGET};
pub use domain::{Section, Snapshot, Task};
pub use gateway::{Gateway, TodoistGateway, TransportError};
pub use housekeeping::Housekeeper;
pub use intent::{MutationIntent, SectionPosition};
pub use reconcile::Reconciler;
pub use schedule::{BACKLOG, canonical_labels, current_month_label};
