use super::entry::AttendanceEntry;
use super::outcome::{SubmissionOutcome, SubmissionStatus};
use super::period::ReportingPeriod;
use super::verdict::ValidationVerdict;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// One entry together with its validation verdict and submission outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub entry: AttendanceEntry,
    #[serde(default)]
    pub verdict: Option<ValidationVerdict>,
    /// Entries the planner never reached still serialize as pending.
    #[serde(default, serialize_with = "outcome_or_pending")]
    pub outcome: Option<SubmissionOutcome>,
}

fn outcome_or_pending<S: Serializer>(
    outcome: &Option<SubmissionOutcome>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    outcome.clone().unwrap_or_default().serialize(serializer)
}

impl BatchEntry {
    pub fn new(entry: AttendanceEntry) -> Self {
        Self {
            entry,
            verdict: None,
            outcome: None,
        }
    }
}

/// The unit of work: an ordered, date-unique collection of entries plus
/// their verdicts and outcomes. Owned exclusively by the run that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub period: ReportingPeriod,
    pub entries: Vec<BatchEntry>,
}

impl Batch {
    pub fn new(period: ReportingPeriod, entries: Vec<AttendanceEntry>) -> Self {
        Self {
            period,
            entries: entries.into_iter().map(BatchEntry::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_by_date(&self, date: NaiveDate) -> Option<&BatchEntry> {
        self.entries.iter().find(|e| e.entry.date == date)
    }

    pub fn entry_by_date_mut(&mut self, date: NaiveDate) -> Option<&mut BatchEntry> {
        self.entries.iter_mut().find(|e| e.entry.date == date)
    }

    /// Outcome status per entry, in batch order. Entries the planner never
    /// touched count as Pending.
    pub fn statuses(&self) -> Vec<(NaiveDate, SubmissionStatus)> {
        self.entries
            .iter()
            .map(|e| {
                let status = e
                    .outcome
                    .as_ref()
                    .map(|o| o.status)
                    .unwrap_or(SubmissionStatus::Pending);
                (e.entry.date, status)
            })
            .collect()
    }
}
