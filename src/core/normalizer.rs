//! Converts raw recognized fragments into typed attendance entries.
//!
//! Classification runs an ordered list of pure matchers over each fragment;
//! the first matching pattern wins, with no backtracking across patterns.
//! Fragments that match nothing are collected, never silently dropped.

use crate::models::{AttendanceEntry, RawFragment};
use crate::utils::date::DatePatterns;
use crate::utils::time::TimePatterns;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::collections::BTreeMap;

/// Tagged classification of one fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedFragment {
    Date(NaiveDate),
    TimePair {
        start: NaiveTime,
        end: Option<NaiveTime>,
    },
    BreakDuration(i64),
    Note(String),
    Unclassified,
}

/// Fragments the normalizer could not interpret, reported alongside the
/// entries. Not a fatal condition for the batch.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct UnparsedFragments {
    pub fragments: Vec<RawFragment>,
}

impl UnparsedFragments {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

pub struct Normalizer {
    dates: DatePatterns,
    times: TimePatterns,
    break_marker: Regex,
    note_marker: Regex,
    minutes: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            dates: DatePatterns::new(),
            times: TimePatterns::new(),
            break_marker: Regex::new(r"(?i)break|休憩").unwrap(),
            note_marker: Regex::new(r"(?i)^(?:note|memo|備考)\s*[::]?\s*(.+)$").unwrap(),
            minutes: Regex::new(r"(\d{1,3})\s*(?:min|分)?\s*$").unwrap(),
        }
    }

    /// Classify one fragment. Priority order: date, time-pair,
    /// break-duration, note, unclassified.
    pub fn classify(&self, fragment: &RawFragment) -> ClassifiedFragment {
        let text = fragment.text.trim();
        let is_break =
            self.break_marker.is_match(&fragment.label) || self.break_marker.is_match(text);
        let note = self.note_marker.captures(text).map(|cap| cap[1].to_string());

        if !is_break && note.is_none() {
            if let Some(date) = self.dates.resolve(text, fragment.context) {
                return ClassifiedFragment::Date(date);
            }
            let times = self.times.find_all(text);
            if let Some(start) = times.first() {
                return ClassifiedFragment::TimePair {
                    start: *start,
                    end: times.get(1).copied(),
                };
            }
        }

        if is_break
            && let Some(minutes) = self.break_minutes(text)
        {
            return ClassifiedFragment::BreakDuration(minutes);
        }

        if let Some(note) = note {
            return ClassifiedFragment::Note(note);
        }

        ClassifiedFragment::Unclassified
    }

    /// Break durations come in either as plain minutes ("60", "45分")
    /// or as a time shape ("1:00") read as hours:minutes.
    fn break_minutes(&self, text: &str) -> Option<i64> {
        if let Some(t) = self.times.find_all(text).first() {
            use chrono::Timelike;
            return Some((t.hour() * 60 + t.minute()) as i64);
        }
        let cap = self.minutes.captures(text)?;
        cap[1].parse().ok()
    }

    /// Normalize a document's fragment stream into entries.
    ///
    /// A date fragment opens an entry; subsequent time-pair, break-duration
    /// and note fragments sharing its row label attach to it. Fragments for
    /// an already-seen date merge last-fragment-wins per field. Classified
    /// fragments with no row to attach to are reported as unparsed.
    pub fn normalize(&self, fragments: &[RawFragment]) -> (Vec<AttendanceEntry>, UnparsedFragments) {
        let mut entries: BTreeMap<NaiveDate, AttendanceEntry> = BTreeMap::new();
        let mut unparsed = UnparsedFragments::default();
        // (row label, date) of the most recently opened row
        let mut current: Option<(String, NaiveDate)> = None;

        for fragment in fragments {
            match self.classify(fragment) {
                ClassifiedFragment::Date(date) => {
                    let entry = entries.entry(date).or_insert_with(|| AttendanceEntry::new(date));
                    entry.merge_confidence(fragment.confidence);
                    entry.raw_fragments.push(fragment.provenance());
                    current = Some((fragment.label.clone(), date));
                }
                ClassifiedFragment::TimePair { start, end } => {
                    match self.open_row(&mut entries, &current, fragment) {
                        Some(entry) => {
                            entry.merge_confidence(fragment.confidence);
                            entry.raw_fragments.push(fragment.provenance());
                            entry.clock_in = Some(start);
                            if end.is_some() {
                                entry.clock_out = end;
                            }
                            note_overnight(entry);
                        }
                        None => unparsed.fragments.push(fragment.clone()),
                    }
                }
                ClassifiedFragment::BreakDuration(minutes) => {
                    match self.open_row(&mut entries, &current, fragment) {
                        Some(entry) => {
                            entry.merge_confidence(fragment.confidence);
                            entry.raw_fragments.push(fragment.provenance());
                            entry.break_minutes = minutes;
                        }
                        None => unparsed.fragments.push(fragment.clone()),
                    }
                }
                ClassifiedFragment::Note(text) => {
                    match self.open_row(&mut entries, &current, fragment) {
                        Some(entry) => {
                            entry.raw_fragments.push(fragment.provenance());
                            entry.notes = Some(text);
                        }
                        None => unparsed.fragments.push(fragment.clone()),
                    }
                }
                ClassifiedFragment::Unclassified => unparsed.fragments.push(fragment.clone()),
            }
        }

        (entries.into_values().collect(), unparsed)
    }

    /// The entry a field fragment belongs to: the most recently opened row,
    /// if its label matches the fragment's.
    fn open_row<'a>(
        &self,
        entries: &'a mut BTreeMap<NaiveDate, AttendanceEntry>,
        current: &Option<(String, NaiveDate)>,
        fragment: &RawFragment,
    ) -> Option<&'a mut AttendanceEntry> {
        match current {
            Some((label, date)) if *label == fragment.label => entries.get_mut(date),
            _ => None,
        }
    }
}

const OVERNIGHT_NOTE: &str = "inferred: clock-out past midnight (overnight shift)";

/// Record an overnight inference in the entry's provenance. Kept out of the
/// data model proper: callers learn it from `is_overnight()`.
fn note_overnight(entry: &mut AttendanceEntry) {
    if entry.is_overnight() && !entry.raw_fragments.iter().any(|f| f == OVERNIGHT_NOTE) {
        entry.raw_fragments.push(OVERNIGHT_NOTE.to_string());
    }
}
