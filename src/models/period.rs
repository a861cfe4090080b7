use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The calendar span a batch reports on. Entries dated outside it are
/// rejected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl ReportingPeriod {
    /// Whole calendar month, e.g. from "2026-03".
    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{}-{:02}", year, month)))?;
        let (ny, nm) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last = NaiveDate::from_ymd_opt(ny, nm, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| AppError::InvalidPeriod(format!("{}-{:02}", year, month)))?;
        Ok(Self { first, last })
    }

    /// Parse "YYYY-MM" into a whole-month period.
    pub fn parse_month(s: &str) -> AppResult<Self> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidPeriod(s.to_string()))?;
        Self::month(d.year(), d.month())
    }

    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        // today is always a valid month start
        Self::month(today.year(), today.month()).unwrap()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month_number(&self) -> u32 {
        self.first.month()
    }
}
