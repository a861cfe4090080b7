//! CSV fragment source.
//!
//! Expected columns: `label,text[,year,month,confidence]`. The optional
//! columns carry document context and the recognizer's confidence hint.

use super::RawRecordSource;
use crate::errors::{AppError, AppResult};
use crate::models::{Confidence, RawFragment};
use std::path::{Path, PathBuf};

pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RawRecordSource for CsvSource {
    fn read(&mut self) -> AppResult<Vec<RawFragment>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| AppError::Source(format!("{}: {}", self.path.display(), e)))?;

        let mut fragments = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let record =
                row.map_err(|e| AppError::Source(format!("{} row {}: {}", self.path.display(), i + 2, e)))?;

            let label = record.get(0).unwrap_or("").to_string();
            let text = record.get(1).unwrap_or("").to_string();
            if label.is_empty() && text.is_empty() {
                continue;
            }

            let mut fragment = RawFragment::new(&label, &text);

            let year = record.get(2).and_then(|v| v.parse::<i32>().ok());
            let month = record.get(3).and_then(|v| v.parse::<u32>().ok());
            if let (Some(y), Some(m)) = (year, month) {
                fragment = fragment.with_context(y, m);
            }

            if let Some(c) = record.get(4) {
                let confidence = Confidence::cf_from_str(c).ok_or_else(|| {
                    AppError::Source(format!(
                        "{} row {}: unknown confidence '{}'",
                        self.path.display(),
                        i + 2,
                        c
                    ))
                })?;
                fragment = fragment.with_confidence(confidence);
            }

            fragments.push(fragment);
        }

        Ok(fragments)
    }
}
