//! Cost extraction from task content
//!
//! Tasks carry free text like "Rent: £450.00!!" or "Buy milk £3.50 and
//! eggs". A task's cost is the first £-prefixed token after stripping
//! stray punctuation; a task with no such token costs nothing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::domain::Task;

/// Everything that is not alphanumeric, '£', '.', or a space gets stripped
/// before tokenizing.
static STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9.£ ]+").expect("strip pattern is valid"));

/// The cost embedded in one task's content, if any.
///
/// At most one value per task: only the first £-prefixed token counts.
pub fn task_cost(task: &Task) -> f64 {
    let trimmed = STRIP.replace_all(&task.content, "");

    for word in trimmed.split_whitespace() {
        if let Some(amount) = word.strip_prefix('£') {
            return match amount.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    warn!(task_id = %task.id, token = %word, "unparseable cost token, counting as zero");
                    0.0
                }
            };
        }
    }

    0.0
}

/// Total cost across a set of tasks.
pub fn total_cost<'a>(tasks: impl Iterator<Item = &'a Task>) -> f64 {
    // fold from +0.0 rather than sum(): f64's Sum identity is -0.0,
    // which would render an empty section's spend as "£-0.00"
    tasks.map(task_cost).fold(0.0, |acc, cost| acc + cost)
}
