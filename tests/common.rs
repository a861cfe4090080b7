#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use attendsync::models::{AttendanceEntry, Batch, ReportingPeriod};
use chrono::{NaiveDate, NaiveTime};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ats() -> Command {
    cargo_bin_cmd!("attendsync")
}

/// Create a unique temp file path inside the system temp dir and remove any
/// existing file
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_attendsync.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a small CSV fragment file useful for many tests
pub fn write_sample_csv(name: &str) -> String {
    let path = temp_path(name, "csv");
    fs::write(
        &path,
        "label,text,year,month,confidence\n\
         row-1,2026-03-02,,,high\n\
         row-1,09:00 18:00,,,high\n\
         row-1,break 60,,,high\n\
         row-2,3/3,2026,3,low\n\
         row-2,22:30 01:15,,,\n\
         row-9,???,,,\n",
    )
    .expect("write sample csv");
    path
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("test time")
}

pub fn march_2026() -> ReportingPeriod {
    ReportingPeriod::parse_month("2026-03").expect("period")
}

pub fn entry(d: &str, clock_in: Option<&str>, clock_out: Option<&str>, brk: i64) -> AttendanceEntry {
    let mut e = AttendanceEntry::new(date(d));
    e.clock_in = clock_in.map(time);
    e.clock_out = clock_out.map(time);
    e.break_minutes = brk;
    e
}

/// A validated batch of plain full-day entries, one per given date
pub fn validated_batch(dates: &[&str]) -> Batch {
    let entries = dates
        .iter()
        .map(|d| entry(d, Some("09:00"), Some("18:00"), 60))
        .collect();
    let mut batch = Batch::new(march_2026(), entries);
    attendsync::core::validator::Validator::new(24 * 60).validate(&mut batch);
    batch
}
