//! HTTP-backed target session (reqwest blocking client with a cookie store).
//!
//! Page-level fidelity lives here and only here: form field names, the
//! logged-in marker and the row-id shapes of the attendance page. The rest
//! of the crate sees the three TargetSession operations.

use super::{Credentials, TargetSession};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceEntry, ReportingPeriod};
use crate::ui::messages;
use crate::utils::time::to_wire;
use chrono::NaiveDate;
use regex::Regex;
use reqwest::blocking::Client;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Marker present on every page that requires authentication.
const LOGIN_FORM_MARKER: &str = "loginForm";
/// Marker present on the attendance page once logged in.
const ATTENDANCE_MARKER: &str = "worktimeStart";

pub struct HttpSession {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpSession {
    pub fn new(cfg: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .user_agent(concat!("attendsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.target_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        })
    }

    fn timeout_or(e: reqwest::Error, what: &str) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(what.to_string())
        } else {
            AppError::Http(e)
        }
    }

    fn get_page(&self, url: &str, what: &str) -> AppResult<String> {
        let mut req = self.client.get(url);
        if let Some(cookie) = &self.session_cookie {
            req = req.header(reqwest::header::COOKIE, cookie.clone());
        }
        let body = req
            .send()
            .map_err(|e| Self::timeout_or(e, what))?
            .error_for_status()
            .map_err(|e| Self::timeout_or(e, what))?
            .text()
            .map_err(|e| Self::timeout_or(e, what))?;
        Ok(body)
    }

    /// Try a persisted session cookie before touching the login form.
    /// Returns true when the attendance page is already reachable.
    fn try_profile(&mut self, profile: &str) -> bool {
        let path = Path::new(profile);
        if !path.exists() {
            messages::warning(format!("session profile not found: {}", profile));
            return false;
        }
        let cookie = match fs::read_to_string(path) {
            Ok(c) => c.trim().to_string(),
            Err(_) => return false,
        };
        if cookie.is_empty() {
            return false;
        }
        self.session_cookie = Some(cookie);
        match self.get_page(&self.base_url, "attendance page probe") {
            Ok(body) if body.contains(ATTENDANCE_MARKER) => {
                messages::info("persisted session accepted, login form bypassed");
                true
            }
            _ => {
                self.session_cookie = None;
                false
            }
        }
    }
}

impl TargetSession for HttpSession {
    fn login(&mut self, credentials: &Credentials, profile: Option<&str>) -> AppResult<()> {
        if let Some(profile) = profile
            && self.try_profile(profile)
        {
            return Ok(());
        }

        let login_url = format!("{}/login", self.base_url);
        let body = self
            .client
            .post(&login_url)
            .form(&[
                ("contractId", credentials.contract_id.as_str()),
                ("authId", credentials.login_id.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout("login".to_string())
                } else {
                    AppError::Authentication(e.to_string())
                }
            })?
            .error_for_status()
            .map_err(|e| AppError::Authentication(e.to_string()))?
            .text()
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        // the target redirects back to the login form on bad credentials
        if body.contains(LOGIN_FORM_MARKER) {
            return Err(AppError::Authentication(
                "login form still shown after submit".to_string(),
            ));
        }
        Ok(())
    }

    fn query_existing_dates(&mut self, period: &ReportingPeriod) -> AppResult<BTreeSet<NaiveDate>> {
        let url = format!(
            "{}?month={}{:02}",
            self.base_url,
            period.year(),
            period.month_number()
        );
        let body = self.get_page(&url, "query existing dates")?;

        // rows carry their date in the clock-in field id; a non-empty value
        // means the day already has submitted data
        let row = Regex::new(r#"ID-worktimeStart-(\d{8})[^>]*value="([^"]+)""#).unwrap();
        let mut existing = BTreeSet::new();
        for cap in row.captures_iter(&body) {
            if cap[2].trim().is_empty() {
                continue;
            }
            if let Ok(date) = NaiveDate::parse_from_str(&cap[1], "%Y%m%d")
                && period.contains(date)
            {
                existing.insert(date);
            }
        }
        Ok(existing)
    }

    fn submit_entry(&mut self, entry: &AttendanceEntry) -> AppResult<()> {
        let date_ymd = entry.date.format("%Y%m%d").to_string();
        let start = entry.clock_in.map(to_wire).unwrap_or_default();
        let end = entry.clock_out.map(to_wire).unwrap_or_default();
        let break_minutes = entry.break_minutes.to_string();
        let memo = entry.notes.clone().unwrap_or_default();

        let mut req = self.client.post(format!("{}/save", self.base_url)).form(&[
            ("date", date_ymd.as_str()),
            ("attendId", "1"),
            ("worktimeStart", start.as_str()),
            ("worktimeEnd", end.as_str()),
            ("breakTime", break_minutes.as_str()),
            ("worktimeMemo", memo.as_str()),
        ]);
        if let Some(cookie) = &self.session_cookie {
            req = req.header(reqwest::header::COOKIE, cookie.clone());
        }

        let response = req.send().map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(format!("submit {}", entry.date_str()))
            } else {
                AppError::Submission(format!("{}: {}", entry.date_str(), e))
            }
        })?;

        if !response.status().is_success() {
            return Err(AppError::Submission(format!(
                "{}: target answered {}",
                entry.date_str(),
                response.status()
            )));
        }
        Ok(())
    }
}
