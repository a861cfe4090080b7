mod common;

use attendsync::core::driver::{CancelToken, DriverConfig, DriverState, SubmissionDriver};
use attendsync::errors::{AppError, AppResult};
use attendsync::models::{AttendanceEntry, ReportingPeriod, SubmissionStatus};
use attendsync::target::dry_run::DryRunSession;
use attendsync::target::{Credentials, TargetSession};
use chrono::NaiveDate;
use common::{date, validated_batch};
use std::collections::BTreeSet;
use std::time::Duration;

fn driver_config() -> DriverConfig {
    DriverConfig {
        login_retry_count: 3,
        login_retry_interval: Duration::ZERO,
        submit_pause: Duration::ZERO,
        close_session_on_done: false,
    }
}

fn credentials() -> Credentials {
    Credentials {
        contract_id: "C-1".to_string(),
        login_id: "user".to_string(),
        password: "secret".to_string(),
    }
}

/// Session whose login always fails; counts the attempts.
#[derive(Default)]
struct BrokenLoginSession {
    login_attempts: u32,
}

impl TargetSession for BrokenLoginSession {
    fn login(&mut self, _c: &Credentials, _p: Option<&str>) -> AppResult<()> {
        self.login_attempts += 1;
        Err(AppError::Authentication("bad credentials".to_string()))
    }

    fn query_existing_dates(&mut self, _p: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>> {
        panic!("query must never run when login never succeeded");
    }

    fn submit_entry(&mut self, _e: &AttendanceEntry) -> AppResult<()> {
        panic!("submit must never run when login never succeeded");
    }
}

/// Session that logs in but cannot read the attendance page.
struct BrokenQuerySession;

impl TargetSession for BrokenQuerySession {
    fn login(&mut self, _c: &Credentials, _p: Option<&str>) -> AppResult<()> {
        Ok(())
    }

    fn query_existing_dates(&mut self, _p: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>> {
        Err(AppError::Timeout("query existing dates".to_string()))
    }

    fn submit_entry(&mut self, _e: &AttendanceEntry) -> AppResult<()> {
        panic!("submit must never run when the existing-dates query failed");
    }
}

/// Session that rejects submissions for a chosen set of dates.
#[derive(Default)]
struct FlakySession {
    fail_dates: BTreeSet<NaiveDate>,
    submitted: Vec<NaiveDate>,
}

impl TargetSession for FlakySession {
    fn login(&mut self, _c: &Credentials, _p: Option<&str>) -> AppResult<()> {
        Ok(())
    }

    fn query_existing_dates(&mut self, _p: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>> {
        Ok(BTreeSet::new())
    }

    fn submit_entry(&mut self, entry: &AttendanceEntry) -> AppResult<()> {
        if self.fail_dates.contains(&entry.date) {
            return Err(AppError::Submission(format!(
                "{}: field fill rejected",
                entry.date_str()
            )));
        }
        self.submitted.push(entry.date);
        Ok(())
    }
}

#[test]
fn exhausted_login_retries_abort_with_entries_pending() {
    // retry count 3 means exactly 4 attempts: the initial one plus 3 retries
    let mut batch = validated_batch(&["2026-03-02", "2026-03-03"]);
    let mut driver = SubmissionDriver::new(BrokenLoginSession::default(), driver_config(), credentials());

    let report = driver.run(&mut batch, &CancelToken::new());

    assert!(report.aborted);
    assert_eq!(report.login_attempts, 4);
    assert!(report.run_error.as_deref().unwrap().contains("login failed"));
    assert_eq!(driver.state(), DriverState::Aborted);
    assert_eq!(driver.into_session().login_attempts, 4);

    // unattempted entries stay pending, distinguishable from failed
    for (_, status) in batch.statuses() {
        assert_eq!(status, SubmissionStatus::Pending);
    }
}

#[test]
fn failed_existing_dates_query_still_reports_every_entry() {
    let mut batch = validated_batch(&["2026-03-02", "2026-03-03"]);
    let mut driver = SubmissionDriver::new(BrokenQuerySession, driver_config(), credentials());

    let report = driver.run(&mut batch, &CancelToken::new());

    // a query timeout ends the run, it never crashes it without a report
    assert!(report.aborted);
    assert!(report.run_error.as_deref().unwrap().contains("Timed out"));
    assert_eq!(driver.state(), DriverState::Aborted);
    assert_eq!(report.pending, 2);

    let statuses = batch.statuses();
    assert_eq!(statuses.len(), 2);
    for (_, status) in statuses {
        assert_eq!(status, SubmissionStatus::Pending);
    }
}

#[test]
fn one_failing_entry_does_not_abort_the_batch() {
    let dates = [
        "2026-03-02",
        "2026-03-03",
        "2026-03-04",
        "2026-03-05",
        "2026-03-06",
    ];
    let mut batch = validated_batch(&dates);
    let session = FlakySession {
        fail_dates: [date("2026-03-04")].into(),
        ..Default::default()
    };
    let mut driver = SubmissionDriver::new(session, driver_config(), credentials());

    let report = driver.run(&mut batch, &CancelToken::new());

    assert!(!report.aborted);
    assert_eq!(report.submitted, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(driver.state(), DriverState::Done);

    let failed = batch
        .entry_by_date(date("2026-03-04"))
        .unwrap()
        .outcome
        .as_ref()
        .unwrap();
    assert_eq!(failed.status, SubmissionStatus::Failed);
    assert!(failed.last_error.as_deref().unwrap().contains("field fill"));

    let session = driver.into_session();
    assert_eq!(session.submitted.len(), 4);
}

#[test]
fn already_present_dates_are_never_submitted() {
    let mut batch = validated_batch(&["2026-03-02", "2026-03-03", "2026-03-04"]);
    let existing: BTreeSet<_> = [date("2026-03-03")].into();
    let session = DryRunSession::with_existing(existing);
    let mut driver = SubmissionDriver::new(session, driver_config(), credentials());

    let report = driver.run(&mut batch, &CancelToken::new());

    assert_eq!(report.skipped, 1);
    assert_eq!(report.submitted, 2);

    let session = driver.into_session();
    assert!(
        !session.submitted.iter().any(|e| e.date == date("2026-03-03")),
        "skipped dates must never reach the target"
    );
}

#[test]
fn blocking_entries_never_reach_the_session() {
    use attendsync::core::validator::Validator;
    use attendsync::models::Batch;

    let entries = vec![
        common::entry("2026-03-02", Some("09:00"), Some("18:00"), 60),
        common::entry("2026-03-03", Some("09:00"), Some("18:00"), -30), // blocking
    ];
    let mut batch = Batch::new(common::march_2026(), entries);
    Validator::new(24 * 60).validate(&mut batch);

    let mut driver =
        SubmissionDriver::new(DryRunSession::new(), driver_config(), credentials());
    driver.run(&mut batch, &CancelToken::new());

    let session = driver.into_session();
    assert_eq!(session.submitted.len(), 1);
    assert_eq!(session.submitted[0].date, date("2026-03-02"));
}

#[test]
fn cancellation_leaves_unstarted_entries_pending() {
    let mut batch = validated_batch(&["2026-03-02", "2026-03-03"]);
    let cancel = CancelToken::new();
    cancel.cancel();

    let mut driver =
        SubmissionDriver::new(DryRunSession::new(), driver_config(), credentials());
    let report = driver.run(&mut batch, &cancel);

    assert!(report.cancelled);
    assert!(!report.aborted);
    assert_eq!(report.submitted, 0);
    assert_eq!(report.pending, 2);
}

#[test]
fn outcome_completeness_after_a_full_run() {
    let mut batch = validated_batch(&["2026-03-02", "2026-03-03", "2026-03-04"]);
    let existing: BTreeSet<_> = [date("2026-03-04")].into();
    let mut driver = SubmissionDriver::new(
        DryRunSession::with_existing(existing),
        driver_config(),
        credentials(),
    );

    driver.run(&mut batch, &CancelToken::new());

    // exactly one status per input entry, all terminal here
    let statuses = batch.statuses();
    assert_eq!(statuses.len(), 3);
    for (d, status) in statuses {
        assert!(status.is_terminal(), "entry {} left unreported", d);
    }
}
