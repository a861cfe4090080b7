//! Raw record sources: where fragment streams come from.
//!
//! The recognition engines themselves are external; this crate consumes
//! their output as files of `(label, text)` fragments, selected by
//! extension.

pub mod csv;
pub mod json;

use crate::errors::{AppError, AppResult};
use crate::models::RawFragment;
use std::path::Path;

pub trait RawRecordSource {
    /// Deliver the ordered fragment stream for one document.
    fn read(&mut self) -> AppResult<Vec<RawFragment>>;
}

/// Open the right source for a file, by extension.
pub fn open(path: &Path) -> AppResult<Box<dyn RawRecordSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(csv::CsvSource::new(path))),
        "json" => Ok(Box::new(json::JsonSource::new(path))),
        _ => Err(AppError::InvalidSource(format!(
            "{} (expected .csv or .json)",
            path.display()
        ))),
    }
}
