//! Time utilities: parsing recognized time shapes, duration formatting.

use chrono::{NaiveTime, Timelike};
use regex::Regex;

/// Compiled time patterns, tried in a fixed priority order.
/// First match wins; no backtracking across patterns.
pub struct TimePatterns {
    colon_or_dot: Regex, // HH:MM / HH.MM
    kanji: Regex,        // H時MM分
    compact: Regex,      // HHMM
}

impl Default for TimePatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePatterns {
    pub fn new() -> Self {
        Self {
            colon_or_dot: Regex::new(r"(\d{1,2})[:.](\d{2})").unwrap(),
            kanji: Regex::new(r"(\d{1,2})時(\d{1,2})分").unwrap(),
            compact: Regex::new(r"\b(\d{2})(\d{2})\b").unwrap(),
        }
    }

    /// All times recognizable in a text, in order of appearance.
    /// Out-of-range hours/minutes are skipped, not errors.
    pub fn find_all(&self, text: &str) -> Vec<NaiveTime> {
        for re in [&self.colon_or_dot, &self.kanji, &self.compact] {
            let mut found = Vec::new();
            for cap in re.captures_iter(text) {
                let hour: u32 = match cap[1].parse() {
                    Ok(h) => h,
                    Err(_) => continue,
                };
                let minute: u32 = match cap[2].parse() {
                    Ok(m) => m,
                    Err(_) => continue,
                };
                if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
                    found.push(t);
                }
            }
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Wire format used by the target system (HH:MM without the colon).
pub fn to_wire(t: NaiveTime) -> String {
    format!("{:02}{:02}", t.hour(), t.minute())
}
