//! Drives the target system through the per-run submission protocol:
//!
//! ```text
//! Idle -> LoggingIn -> QueryingExisting -> Submitting(e1..en) -> Done
//!              \-> (failure, attempts left) -> LoggingIn after interval
//!              \-> (failure, attempts exhausted) -> Aborted
//! ```
//!
//! One run owns one session; entries are submitted strictly sequentially.
//! A per-entry failure marks that entry Failed and the run continues;
//! exhausted login retries and a failed existing-dates query abort the run,
//! still reporting every entry.

use crate::config::Config;
use crate::core::planner;
use crate::models::{Batch, SubmissionStatus};
use crate::target::{Credentials, TargetSession};
use crate::ui::messages;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    LoggingIn,
    QueryingExisting,
    Submitting(usize),
    Done,
    Aborted,
}

/// Cooperative cancellation, checked before each entry submission.
/// Entries not yet started stay Pending; nothing is rolled back.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub login_retry_count: u32,
    pub login_retry_interval: Duration,
    pub submit_pause: Duration,
    pub close_session_on_done: bool,
}

impl DriverConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            login_retry_count: cfg.login_retry_count,
            login_retry_interval: Duration::from_secs(cfg.login_retry_interval),
            submit_pause: Duration::from_millis(cfg.submit_pause_ms),
            close_session_on_done: cfg.close_session_on_done,
        }
    }
}

/// Final report of one driver run. Per-entry outcomes live on the batch;
/// this aggregates them plus the run-level result.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    pub aborted: bool,
    /// Cause of an aborted run (login exhaustion, failed existing-dates query).
    pub run_error: Option<String>,
    pub cancelled: bool,
    pub login_attempts: u32,
    pub planned: usize,
    pub submitted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pending: usize,
}

pub struct SubmissionDriver<S: TargetSession> {
    session: S,
    config: DriverConfig,
    credentials: Credentials,
    profile: Option<String>,
    state: DriverState,
}

impl<S: TargetSession> SubmissionDriver<S> {
    pub fn new(session: S, config: DriverConfig, credentials: Credentials) -> Self {
        Self {
            session,
            config,
            credentials,
            profile: None,
            state: DriverState::Idle,
        }
    }

    /// Persisted session profile that may bypass the login form entirely.
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Reclaim the session. The driver never closes it on failure, so the
    /// operator can inspect whatever the target left on screen.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Execute the full protocol against `batch`.
    ///
    /// Always produces a report: run-scoped failures (login exhaustion, a
    /// failed existing-dates query) terminate the run but still report
    /// every entry's outcome, with the cause in `run_error`.
    pub fn run(&mut self, batch: &mut Batch, cancel: &CancelToken) -> RunReport {
        let mut login_attempts = 0;

        if !self.login(&mut login_attempts) {
            self.state = DriverState::Aborted;
            // unattempted entries stay Pending, distinguishable from Failed
            let cause = format!("login failed after {} attempts", login_attempts);
            return self.report(batch, login_attempts, 0, false, Some(cause));
        }

        self.state = DriverState::QueryingExisting;
        let existing = match self.session.query_existing_dates(&batch.period) {
            Ok(existing) => existing,
            Err(e) => {
                messages::warning(format!("existing-dates query failed: {}", e));
                self.state = DriverState::Aborted;
                return self.report(batch, login_attempts, 0, false, Some(e.to_string()));
            }
        };

        let plan = planner::plan(batch, &existing);
        let mut cancelled = false;

        for (i, date) in plan.iter().enumerate() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            self.state = DriverState::Submitting(i);

            let Some(item) = batch.entry_by_date_mut(*date) else {
                continue;
            };
            let Some(outcome) = item.outcome.as_mut() else {
                continue;
            };
            outcome.record_attempt();

            match self.session.submit_entry(&item.entry) {
                Ok(()) => outcome.finish(SubmissionStatus::Submitted, None),
                Err(e) => {
                    // isolated: one bad entry never aborts the batch
                    messages::warning(format!("submission failed for {}: {}", date, e));
                    outcome.finish(SubmissionStatus::Failed, Some(e.to_string()));
                }
            }

            if i + 1 < plan.len() && !self.config.submit_pause.is_zero() {
                thread::sleep(self.config.submit_pause);
            }
        }

        self.state = DriverState::Done;
        if self.config.close_session_on_done && !cancelled {
            self.session.close();
        }

        self.report(batch, login_attempts, plan.len(), cancelled, None)
    }

    /// Bounded login loop: initial attempt plus `login_retry_count` retries,
    /// waiting `login_retry_interval` between attempts.
    fn login(&mut self, attempts: &mut u32) -> bool {
        self.state = DriverState::LoggingIn;
        let max_attempts = self.config.login_retry_count + 1;

        loop {
            *attempts += 1;
            match self
                .session
                .login(&self.credentials, self.profile.as_deref())
            {
                Ok(()) => return true,
                Err(e) => {
                    messages::warning(format!(
                        "login attempt {}/{} failed: {}",
                        attempts, max_attempts, e
                    ));
                    if *attempts >= max_attempts {
                        return false;
                    }
                    if !self.config.login_retry_interval.is_zero() {
                        thread::sleep(self.config.login_retry_interval);
                    }
                }
            }
        }
    }

    fn report(
        &self,
        batch: &Batch,
        login_attempts: u32,
        planned: usize,
        cancelled: bool,
        run_error: Option<String>,
    ) -> RunReport {
        let mut report = RunReport {
            aborted: self.state == DriverState::Aborted,
            run_error,
            cancelled,
            login_attempts,
            planned,
            submitted: 0,
            skipped: 0,
            failed: 0,
            pending: 0,
        };
        for (_, status) in batch.statuses() {
            match status {
                SubmissionStatus::Pending => report.pending += 1,
                SubmissionStatus::SkippedAlreadyPresent => report.skipped += 1,
                SubmissionStatus::Submitted => report.submitted += 1,
                SubmissionStatus::Failed => report.failed += 1,
            }
        }
        report
    }
}
