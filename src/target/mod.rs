//! Target-system boundary.
//!
//! The driver talks to the target through three black-box operations;
//! everything selector- or page-specific lives behind this trait.

pub mod dry_run;
pub mod http;

use crate::errors::AppResult;
use crate::models::{AttendanceEntry, ReportingPeriod};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub contract_id: String,
    pub login_id: String,
    pub password: String,
}

pub trait TargetSession {
    /// Authenticate, optionally through a persisted profile that can
    /// bypass the login form entirely.
    fn login(&mut self, credentials: &Credentials, profile: Option<&str>) -> AppResult<()>;

    /// The dates within the period that already carry submitted data.
    /// Runs once per batch, never once per entry.
    fn query_existing_dates(&mut self, period: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>>;

    /// Navigate to the entry's date, fill the fields, confirm.
    fn submit_entry(&mut self, entry: &AttendanceEntry) -> AppResult<()>;

    /// Tear the session down. The driver only calls this when configured to;
    /// by default the session stays open for operator inspection.
    fn close(&mut self) {}
}
