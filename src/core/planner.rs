//! Orders validated entries for submission.
//!
//! Planning is a pure function of the validated batch and the set of dates
//! already present at the target: re-running it with the same inputs yields
//! the same plan.

use crate::models::{Batch, SubmissionOutcome, SubmissionStatus};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub const BLOCKED_BY_VALIDATION: &str = "blocked by validation";

/// Decide each entry's fate and return the dates to submit, ascending.
///
/// Blocking entries fail immediately; dates already present at the target
/// are skipped so existing data is never overwritten; the rest become
/// Pending and enter the plan.
pub fn plan(batch: &mut Batch, existing: &BTreeSet<NaiveDate>) -> Vec<NaiveDate> {
    let mut planned: BTreeSet<NaiveDate> = BTreeSet::new();

    for item in &mut batch.entries {
        let blocked = match &item.verdict {
            Some(v) => v.is_blocking(),
            None => true, // never validated, treated as blocked
        };

        // re-planning an already-reported batch never reverts a terminal
        // outcome and never schedules that entry again
        let outcome = item.outcome.get_or_insert_with(SubmissionOutcome::pending);
        if outcome.status.is_terminal() {
            continue;
        }

        if blocked {
            outcome.finish(
                SubmissionStatus::Failed,
                Some(BLOCKED_BY_VALIDATION.to_string()),
            );
        } else if existing.contains(&item.entry.date) {
            outcome.finish(SubmissionStatus::SkippedAlreadyPresent, None);
        } else {
            planned.insert(item.entry.date);
        }
    }

    planned.into_iter().collect()
}
