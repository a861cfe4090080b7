//! Session that performs no network traffic: it accepts the login, reports
//! a configurable set of already-present dates and records what would have
//! been submitted. Backs `run --dry-run`.

use super::{Credentials, TargetSession};
use crate::errors::AppResult;
use crate::models::{AttendanceEntry, ReportingPeriod};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct DryRunSession {
    pub existing: BTreeSet<NaiveDate>,
    pub submitted: Vec<AttendanceEntry>,
}

impl DryRunSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(existing: BTreeSet<NaiveDate>) -> Self {
        Self {
            existing,
            submitted: Vec::new(),
        }
    }
}

impl TargetSession for DryRunSession {
    fn login(&mut self, _credentials: &Credentials, _profile: Option<&str>) -> AppResult<()> {
        Ok(())
    }

    fn query_existing_dates(&mut self, _period: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>> {
        Ok(self.existing.clone())
    }

    fn submit_entry(&mut self, entry: &AttendanceEntry) -> AppResult<()> {
        self.submitted.push(entry.clone());
        Ok(())
    }
}
