use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    SkippedAlreadyPresent,
    Submitted,
    Failed,
}

impl SubmissionStatus {
    pub fn st_as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::SkippedAlreadyPresent => "skipped-already-present",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

/// Submission result attached 1:1 to an attendance entry.
/// Created Pending, transitions exactly once to a terminal state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubmissionOutcome {
    pub status: SubmissionStatus,
    pub attempts: u32,
    pub last_error: Option<String>,
}

impl SubmissionOutcome {
    pub fn pending() -> Self {
        Self::default()
    }

    /// Move to a terminal state. A second transition is ignored: outcomes
    /// never revert once terminal.
    pub fn finish(&mut self, status: SubmissionStatus, error: Option<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        self.last_error = error;
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }
}
