//! Canonical schedule builder
//!
//! Derives the 13 expected section labels for the rolling 12-month
//! window: the current month first, then the evergreen "Backlog", then
//! the remaining 11 months in chronological order. Months earlier in
//! the calendar than the current one belong to the next cycle, so they
//! get next year's label.
//!
//! Derived fresh from the given date on every pass; never persisted.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Name of the evergreen catch-all section
pub const BACKLOG: &str = "Backlog";

/// The (year, month) pairs of the rolling window, sorted ascending.
///
/// Every month 1..=12 appears exactly once; months before the current
/// month are pushed into next year, so the sorted pairs are strictly
/// increasing and the current month sorts first.
fn rolling_months(today: NaiveDate) -> Vec<(i32, u32)> {
    let current_month = today.month();
    let current_year = today.year();

    let mut months: Vec<(i32, u32)> = (1..=12)
        .map(|month| {
            let year = if month < current_month {
                current_year + 1
            } else {
                current_year
            };
            (year, month)
        })
        .collect();

    months.sort_unstable();
    months
}

fn month_label(year: i32, month: u32) -> String {
    // month is 1..=12 for every caller; fall back to raw numbers rather
    // than panic if that ever stops being true
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%B %Y").to_string(),
        None => format!("{} {}", month, year),
    }
}

/// The ordered canonical labels: [current month, "Backlog", 11 more months].
pub fn canonical_labels(today: NaiveDate) -> Vec<String> {
    let months = rolling_months(today);

    let mut labels: Vec<String> = months.into_iter().map(|(year, month)| month_label(year, month)).collect();
    let rest = labels.split_off(1);
    labels.push(BACKLOG.to_string());
    labels.extend(rest);

    debug!(count = labels.len(), "canonical_labels: built schedule");
    labels
}

/// The "Month Year" label for the given date's month.
///
/// Used to find the section that in-flight tasks get relocated into and
/// to decide which section carries the overspend alarm.
pub fn current_month_label(today: NaiveDate) -> String {
    month_label(today.year(), today.month())
}
