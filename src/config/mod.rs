use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Attendance page of the target system,
    /// e.g. https://app.example.in/ap/menuAttendance/
    pub target_url: String,
    pub contract_id: String,
    pub login_id: String,
    pub password: String,
    /// Persisted browser/session profile that may bypass the login form.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Default reporting period ("YYYY-MM"), used when --period is absent.
    #[serde(default)]
    pub reporting_period: Option<String>,
    #[serde(default = "default_login_retry_count")]
    pub login_retry_count: u32,
    #[serde(default = "default_login_retry_interval")]
    pub login_retry_interval: u64,
    /// Longest plausible net worked duration, in minutes.
    #[serde(default = "default_max_work_minutes")]
    pub max_work_minutes: i64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Pause between per-entry submissions, to avoid hammering the target.
    #[serde(default = "default_submit_pause")]
    pub submit_pause_ms: u64,
    /// Recognized for session backends that render a UI; the plain HTTP
    /// backend ignores it.
    #[serde(default)]
    pub headless: bool,
    /// The session is left open for operator inspection unless this is set.
    #[serde(default)]
    pub close_session_on_done: bool,
}

fn default_login_retry_count() -> u32 {
    3
}
fn default_login_retry_interval() -> u64 {
    5
}
fn default_max_work_minutes() -> i64 {
    24 * 60
}
fn default_request_timeout() -> u64 {
    30
}
fn default_submit_pause() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            contract_id: String::new(),
            login_id: String::new(),
            password: String::new(),
            profile_path: None,
            reporting_period: None,
            login_retry_count: default_login_retry_count(),
            login_retry_interval: default_login_retry_interval(),
            max_work_minutes: default_max_work_minutes(),
            request_timeout_secs: default_request_timeout(),
            submit_pause_ms: default_submit_pause(),
            headless: false,
            close_session_on_done: false,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("attendsync")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".attendsync")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("attendsync.conf")
    }

    /// Load configuration from the default location, or return defaults
    /// if no file exists yet.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    /// Load configuration from an explicit path (CLI --config override).
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
    }

    /// Write this configuration to a path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize a default configuration file if none exists.
    pub fn init(path: &Path) -> AppResult<()> {
        if path.exists() {
            return Err(AppError::Config(format!(
                "configuration file already exists: {}",
                path.display()
            )));
        }
        Config::default().save_to(path)
    }

    /// Names of required fields currently missing a value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.target_url.trim().is_empty() {
            missing.push("target_url");
        }
        if self.contract_id.trim().is_empty() {
            missing.push("contract_id");
        }
        if self.login_id.trim().is_empty() {
            missing.push("login_id");
        }
        if self.password.trim().is_empty() {
            missing.push("password");
        }
        missing
    }

    /// Credentials must be complete before a real (non dry-run) submission.
    pub fn require_credentials(&self) -> AppResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )))
        }
    }
}
