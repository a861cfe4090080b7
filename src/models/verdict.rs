use serde::{Deserialize, Serialize};

/// Validation severity. Severities on one entry combine by max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Blocking,
}

impl Severity {
    pub fn sv_as_str(&self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Warning => "warning",
            Severity::Blocking => "blocking",
        }
    }
}

/// Validation result attached 1:1 to an attendance entry.
/// An entry with Blocking severity must never reach the submission driver.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationVerdict {
    pub severity: Severity,
    pub reasons: Vec<String>,
}

impl ValidationVerdict {
    pub fn ok() -> Self {
        Self::default()
    }

    /// Append a finding, raising the severity if the new one is higher.
    pub fn add(&mut self, severity: Severity, reason: impl Into<String>) {
        self.severity = self.severity.max(severity);
        self.reasons.push(reason.into());
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}
