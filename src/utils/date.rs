//! Date utilities: parsing the regional date shapes produced by the
//! recognition collaborators.

use crate::models::DocumentContext;
use chrono::NaiveDate;
use regex::Regex;

/// Compiled date patterns, tried in a fixed priority order.
/// First match wins; no backtracking across patterns.
pub struct DatePatterns {
    kanji_full: Regex, // YYYY年MM月DD日
    iso_like: Regex,   // YYYY-MM-DD / YYYY/MM/DD
    month_day: Regex,  // MM/DD (year from context)
    day_only: Regex,   // DD日 or a bare day-of-month (month/year from context)
}

impl Default for DatePatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl DatePatterns {
    pub fn new() -> Self {
        Self {
            kanji_full: Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").unwrap(),
            iso_like: Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})").unwrap(),
            month_day: Regex::new(r"\b(\d{1,2})/(\d{1,2})\b").unwrap(),
            day_only: Regex::new(r"^\s*(\d{1,2})\s*日?\s*$").unwrap(),
        }
    }

    /// Resolve a date from recognized text. Partial shapes fall back to the
    /// document context; without context they stay unresolved (None).
    pub fn resolve(&self, text: &str, context: Option<DocumentContext>) -> Option<NaiveDate> {
        if let Some(cap) = self.kanji_full.captures(text) {
            return ymd(&cap[1], &cap[2], &cap[3]);
        }
        if let Some(cap) = self.iso_like.captures(text) {
            return ymd(&cap[1], &cap[2], &cap[3]);
        }
        if let Some(cap) = self.month_day.captures(text) {
            let ctx = context?;
            return ymd(&ctx.year.to_string(), &cap[1], &cap[2]);
        }
        if let Some(cap) = self.day_only.captures(text) {
            let ctx = context?;
            let day: u32 = cap[1].parse().ok()?;
            return NaiveDate::from_ymd_opt(ctx.year, ctx.month, day);
        }
        None
    }
}

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    let day: u32 = d.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
