//! Unified application error type.
//! All modules (core, source, target, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),

    #[error("Unsupported source file: {0}")]
    InvalidSource(String),

    #[error("Malformed source record: {0}")]
    Source(String),

    // ---------------------------
    // Target-system errors
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Run aborted: {0}")]
    Aborted(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Reporting
    // ---------------------------
    #[error("Report error: {0}")]
    Report(String),
}

pub type AppResult<T> = Result<T, AppError>;
