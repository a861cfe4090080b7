//! Rendering of a batch (entries, verdicts, outcomes) for the terminal
//! and as JSON for downstream tooling.

use crate::core::normalizer::UnparsedFragments;
use crate::core::validator::ValidationSummary;
use crate::errors::{AppError, AppResult};
use crate::models::{Batch, Severity, SubmissionStatus};
use crate::ui::messages::{FG_GREEN, FG_GREY, FG_RED, FG_YELLOW, RESET};
use crate::utils::table::Table;
use crate::utils::time::format_minutes;
use serde::Serialize;

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => FG_GREEN,
        Severity::Warning => FG_YELLOW,
        Severity::Blocking => FG_RED,
    }
}

fn status_color(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Submitted => FG_GREEN,
        SubmissionStatus::SkippedAlreadyPresent => FG_GREY,
        SubmissionStatus::Failed => FG_RED,
        SubmissionStatus::Pending => FG_YELLOW,
    }
}

/// Fixed-width table of the batch, one row per entry.
/// Columns adapt: the outcome column only appears once outcomes exist.
pub fn render_batch(batch: &Batch, color: bool) -> String {
    let with_outcomes = batch.entries.iter().any(|e| e.outcome.is_some());

    let mut headers = vec!["Date", "In", "Out", "Break", "Worked", "Verdict"];
    if with_outcomes {
        headers.push("Outcome");
    }
    headers.push("Findings");

    let mut table = Table::new(&headers);
    for item in &batch.entries {
        let entry = &item.entry;
        let worked = entry
            .worked_minutes()
            .map(format_minutes)
            .unwrap_or_else(|| "--:--".to_string());

        let (severity, reasons) = match &item.verdict {
            Some(v) => (v.severity, v.reasons.join("; ")),
            None => (Severity::Ok, String::new()),
        };
        let verdict_cell = if color {
            format!("{}{}{}", severity_color(severity), severity.sv_as_str(), RESET)
        } else {
            severity.sv_as_str().to_string()
        };

        let mut row = vec![
            entry.date_str(),
            entry.clock_in_str(),
            entry.clock_out_str(),
            format_minutes(entry.break_minutes),
            worked,
            verdict_cell,
        ];

        if with_outcomes {
            let (status, error) = match &item.outcome {
                Some(o) => (o.status, o.last_error.clone()),
                None => (SubmissionStatus::Pending, None),
            };
            let cell = if color {
                format!("{}{}{}", status_color(status), status.st_as_str(), RESET)
            } else {
                status.st_as_str().to_string()
            };
            row.push(cell);
            let mut findings = reasons.clone();
            if let Some(err) = error {
                if !findings.is_empty() {
                    findings.push_str("; ");
                }
                findings.push_str(&err);
            }
            row.push(findings);
        } else {
            row.push(reasons);
        }

        table.add_row(row);
    }

    table.render()
}

/// Human-readable list of fragments the normalizer gave up on.
pub fn render_unparsed(unparsed: &UnparsedFragments) -> String {
    let mut out = String::new();
    for fragment in &unparsed.fragments {
        out.push_str(&format!("  {} -> {:?}\n", fragment.label, fragment.text));
    }
    out
}

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub batch: &'a Batch,
    pub summary: Option<&'a ValidationSummary>,
    pub unparsed: &'a UnparsedFragments,
}

pub fn to_json(report: &JsonReport) -> AppResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| AppError::Report(e.to_string()))
}
