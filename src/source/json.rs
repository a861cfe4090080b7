//! JSON fragment source: an array of fragment objects, the shape the
//! recognition collaborators export.
//!
//! ```json
//! [
//!   { "label": "row-3", "text": "3日", "context": { "year": 2026, "month": 3 } },
//!   { "label": "row-3", "text": "09:00 18:00", "confidence": "low" }
//! ]
//! ```

use super::RawRecordSource;
use crate::errors::{AppError, AppResult};
use crate::models::RawFragment;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RawRecordSource for JsonSource {
    fn read(&mut self) -> AppResult<Vec<RawFragment>> {
        let file = File::open(&self.path)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| AppError::Source(format!("{}: {}", self.path.display(), e)))
    }
}
