//! Business-rule validation of a normalized batch.
//!
//! Each rule appends a human-readable reason to the entry's verdict;
//! severities combine by max. The validator makes no submit decision
//! beyond per-entry severity; the caller reads the aggregate summary.

use crate::models::{Batch, Confidence, Severity, ValidationVerdict};
use crate::utils::time::format_minutes;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub ok: usize,
    pub warnings: usize,
    pub blocking: usize,
}

impl ValidationSummary {
    pub fn has_blocking(&self) -> bool {
        self.blocking > 0
    }
}

pub struct Validator {
    max_work_minutes: i64,
}

impl Validator {
    pub fn new(max_work_minutes: i64) -> Self {
        Self { max_work_minutes }
    }

    /// Assign a verdict to every entry and return the aggregate summary.
    pub fn validate(&self, batch: &mut Batch) -> ValidationSummary {
        let period = batch.period;
        let mut seen: HashSet<NaiveDate> = HashSet::new();
        let mut summary = ValidationSummary {
            total: batch.len(),
            ..Default::default()
        };

        for item in &mut batch.entries {
            let entry = &item.entry;
            let mut verdict = ValidationVerdict::ok();

            match (entry.clock_in, entry.clock_out) {
                (Some(_), None) => {
                    verdict.add(Severity::Warning, "clock-out missing while clock-in present");
                }
                (None, Some(_)) => {
                    verdict.add(Severity::Warning, "clock-in missing while clock-out present");
                }
                _ => {}
            }

            if entry.break_minutes < 0 {
                verdict.add(
                    Severity::Blocking,
                    format!("negative break duration: {} minutes", entry.break_minutes),
                );
            }

            if let Some(worked) = entry.worked_minutes() {
                if worked < 0 {
                    verdict.add(
                        Severity::Blocking,
                        format!("negative worked duration: {}", format_minutes(worked)),
                    );
                } else if worked > self.max_work_minutes {
                    verdict.add(
                        Severity::Blocking,
                        format!(
                            "worked duration {} exceeds maximum {}",
                            format_minutes(worked),
                            format_minutes(self.max_work_minutes)
                        ),
                    );
                }
            }

            if !period.contains(entry.date) {
                verdict.add(
                    Severity::Blocking,
                    format!(
                        "date {} outside reporting period {} .. {}",
                        entry.date_str(),
                        period.first,
                        period.last
                    ),
                );
            }

            // The normalizer merges same-date fragments, so a duplicate here
            // means the batch was assembled or edited outside the pipeline.
            if !seen.insert(entry.date) {
                verdict.add(
                    Severity::Blocking,
                    format!("duplicate date in batch: {}", entry.date_str()),
                );
            }

            // Low confidence is a hint, never escalated to blocking by itself.
            if entry.confidence == Confidence::Low {
                verdict.add(Severity::Warning, "low recognition confidence");
            }

            match verdict.severity {
                Severity::Ok => summary.ok += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Blocking => summary.blocking += 1,
            }
            item.verdict = Some(verdict);
        }

        summary
    }
}
