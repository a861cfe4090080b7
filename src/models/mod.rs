pub mod batch;
pub mod entry;
pub mod fragment;
pub mod outcome;
pub mod period;
pub mod verdict;

pub use batch::{Batch, BatchEntry};
pub use entry::AttendanceEntry;
pub use fragment::{Confidence, DocumentContext, RawFragment};
pub use outcome::{SubmissionOutcome, SubmissionStatus};
pub use period::ReportingPeriod;
pub use verdict::{Severity, ValidationVerdict};
