mod common;

use attendsync::core::validator::Validator;
use attendsync::models::{Batch, Confidence, Severity};
use common::{entry, march_2026};

fn validator() -> Validator {
    Validator::new(24 * 60)
}

fn severity_of(batch: &Batch, i: usize) -> Severity {
    batch.entries[i].verdict.as_ref().expect("verdict").severity
}

#[test]
fn clean_entry_is_ok() {
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-03-02", Some("09:00"), Some("18:00"), 60)],
    );
    let summary = validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Ok);
    assert_eq!(summary.ok, 1);
    assert!(!summary.has_blocking());
}

#[test]
fn missing_counterpart_time_is_a_warning() {
    let mut batch = Batch::new(
        march_2026(),
        vec![
            entry("2026-03-02", Some("09:00"), None, 0),
            entry("2026-03-03", None, Some("18:00"), 0),
        ],
    );
    let summary = validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Warning);
    assert_eq!(severity_of(&batch, 1), Severity::Warning);
    assert_eq!(summary.warnings, 2);
}

#[test]
fn overnight_shift_is_not_blocking() {
    // 23:00 -> 01:00 with no break is 120 worked minutes, not negative
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-03-02", Some("23:00"), Some("01:00"), 0)],
    );
    validator().validate(&mut batch);

    assert_eq!(batch.entries[0].entry.worked_minutes(), Some(120));
    assert_eq!(severity_of(&batch, 0), Severity::Ok);
}

#[test]
fn negative_worked_duration_blocks() {
    // break longer than the whole shift
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-03-02", Some("09:00"), Some("10:00"), 120)],
    );
    let summary = validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Blocking);
    assert!(summary.has_blocking());
}

#[test]
fn implausibly_long_duration_blocks() {
    let strict = Validator::new(16 * 60);
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-03-02", Some("06:00"), Some("23:30"), 0)],
    );
    strict.validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Blocking);
}

#[test]
fn negative_break_blocks() {
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-03-02", Some("09:00"), Some("18:00"), -30)],
    );
    validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Blocking);
}

#[test]
fn date_outside_reporting_period_blocks() {
    let mut batch = Batch::new(
        march_2026(),
        vec![entry("2026-04-01", Some("09:00"), Some("18:00"), 60)],
    );
    validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Blocking);
}

#[test]
fn low_confidence_warns_but_never_blocks() {
    let mut e = entry("2026-03-02", Some("09:00"), Some("18:00"), 60);
    e.confidence = Confidence::Low;
    let mut batch = Batch::new(march_2026(), vec![e]);
    validator().validate(&mut batch);

    let verdict = batch.entries[0].verdict.as_ref().unwrap();
    assert_eq!(verdict.severity, Severity::Warning);
    assert!(verdict.reasons.iter().any(|r| r.contains("confidence")));
}

#[test]
fn duplicate_dates_are_recaught_defensively() {
    // the normalizer merges duplicates, but an edited batch may not
    let mut batch = Batch::new(
        march_2026(),
        vec![
            entry("2026-03-02", Some("09:00"), Some("18:00"), 60),
            entry("2026-03-02", Some("10:00"), Some("19:00"), 60),
        ],
    );
    let summary = validator().validate(&mut batch);

    assert_eq!(severity_of(&batch, 0), Severity::Ok);
    assert_eq!(severity_of(&batch, 1), Severity::Blocking);
    assert_eq!(summary.blocking, 1);
}

#[test]
fn severities_combine_by_max() {
    // low confidence (warning) + negative break (blocking) -> blocking,
    // with both findings listed
    let mut e = entry("2026-03-02", Some("09:00"), Some("18:00"), -10);
    e.confidence = Confidence::Low;
    let mut batch = Batch::new(march_2026(), vec![e]);
    validator().validate(&mut batch);

    let verdict = batch.entries[0].verdict.as_ref().unwrap();
    assert_eq!(verdict.severity, Severity::Blocking);
    assert!(verdict.reasons.len() >= 2);
}

#[test]
fn summary_counts_every_entry_once() {
    let mut low = entry("2026-03-04", Some("09:00"), Some("18:00"), 60);
    low.confidence = Confidence::Low;
    let mut batch = Batch::new(
        march_2026(),
        vec![
            entry("2026-03-02", Some("09:00"), Some("18:00"), 60),
            entry("2026-03-03", Some("09:00"), Some("18:00"), -5),
            low,
        ],
    );
    let summary = validator().validate(&mut batch);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.ok + summary.warnings + summary.blocking, 3);
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.blocking, 1);
}
