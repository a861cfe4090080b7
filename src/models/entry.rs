use super::fragment::Confidence;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in a day, used for the overnight wrap.
const DAY_MINUTES: i64 = 24 * 60;

/// One calendar day's attendance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: NaiveDate, // unique key within a batch
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub break_minutes: i64, // signed so edited batches can be re-validated
    pub notes: Option<String>,
    pub confidence: Confidence,
    /// Ordered provenance: the raw fragments this entry was derived from,
    /// plus any inference notes (e.g. overnight wrap).
    pub raw_fragments: Vec<String>,
}

impl AttendanceEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            clock_in: None,
            clock_out: None,
            break_minutes: 0,
            notes: None,
            confidence: Confidence::Unknown,
            raw_fragments: Vec::new(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn clock_in_str(&self) -> String {
        match self.clock_in {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }

    pub fn clock_out_str(&self) -> String {
        match self.clock_out {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        }
    }

    /// Net worked minutes: clock_out - clock_in - break.
    /// A clock_out numerically before clock_in means the shift crossed
    /// midnight and wraps forward by one day. None when either time is absent.
    pub fn worked_minutes(&self) -> Option<i64> {
        let start = self.clock_in?;
        let end = self.clock_out?;

        let start_min = (start.hour() * 60 + start.minute()) as i64;
        let mut end_min = (end.hour() * 60 + end.minute()) as i64;

        if end_min < start_min {
            end_min += DAY_MINUTES;
        }

        Some(end_min - start_min - self.break_minutes)
    }

    /// True when the recorded times imply a shift crossing midnight.
    pub fn is_overnight(&self) -> bool {
        match (self.clock_in, self.clock_out) {
            (Some(start), Some(end)) => end < start,
            _ => false,
        }
    }

    /// Combine this entry's confidence with a new fragment's.
    /// Any Low dominates; High survives only while every fragment was High.
    /// The first fragment sets the confidence outright.
    pub fn merge_confidence(&mut self, other: Confidence) {
        if self.raw_fragments.is_empty() {
            self.confidence = other;
            return;
        }
        self.confidence = match (self.confidence, other) {
            (Confidence::Low, _) | (_, Confidence::Low) => Confidence::Low,
            (Confidence::High, Confidence::High) => Confidence::High,
            _ => Confidence::Unknown,
        };
    }
}
