//! Shared extract/validate plumbing used by the CLI commands.

use crate::core::normalizer::{Normalizer, UnparsedFragments};
use crate::core::validator::{ValidationSummary, Validator};
use crate::errors::AppResult;
use crate::models::{Batch, RawFragment, ReportingPeriod};
use crate::source;
use std::path::Path;

/// Read a source file, normalize its fragments and assemble a batch.
///
/// The reporting period comes from, in order: the explicit `--period`
/// argument, the document context of the first fragment carrying one,
/// or the current month.
pub fn build_batch(
    path: &Path,
    period: Option<&str>,
) -> AppResult<(Batch, UnparsedFragments)> {
    let mut src = source::open(path)?;
    let fragments = src.read()?;
    let period = resolve_period(period, &fragments)?;

    let normalizer = Normalizer::new();
    let (entries, unparsed) = normalizer.normalize(&fragments);

    Ok((Batch::new(period, entries), unparsed))
}

/// Validate a batch in place.
pub fn validate_batch(batch: &mut Batch, max_work_minutes: i64) -> ValidationSummary {
    Validator::new(max_work_minutes).validate(batch)
}

fn resolve_period(arg: Option<&str>, fragments: &[RawFragment]) -> AppResult<ReportingPeriod> {
    if let Some(p) = arg {
        return ReportingPeriod::parse_month(p);
    }
    if let Some(ctx) = fragments.iter().find_map(|f| f.context) {
        return ReportingPeriod::month(ctx.year, ctx.month);
    }
    Ok(ReportingPeriod::current_month())
}
