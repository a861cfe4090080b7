use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline;
use crate::errors::AppResult;
use crate::report;
use crate::ui::messages;
use std::path::Path;

/// Handle the `validate` command: extract and validate, report per-entry
/// verdicts and the aggregate summary. Nothing is submitted.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Validate { file, period, json } = cmd {
        let period = period.as_deref().or(cfg.reporting_period.as_deref());
        let (mut batch, unparsed) = pipeline::build_batch(Path::new(file), period)?;
        let summary = pipeline::validate_batch(&mut batch, cfg.max_work_minutes);

        if *json {
            let out = report::to_json(&report::JsonReport {
                batch: &batch,
                summary: Some(&summary),
                unparsed: &unparsed,
            })?;
            println!("{}", out);
            return Ok(());
        }

        messages::header(format!(
            "Validated {} entries ({} .. {})",
            batch.len(),
            batch.period.first,
            batch.period.last
        ));
        print!("{}", report::render_batch(&batch, true));

        if !unparsed.is_empty() {
            messages::warning(format!("{} fragments could not be interpreted:", unparsed.len()));
            print!("{}", report::render_unparsed(&unparsed));
        }

        println!();
        println!(
            "Summary: {} total, {} ok, {} warnings, {} blocking",
            summary.total, summary.ok, summary.warnings, summary.blocking
        );
        if summary.has_blocking() {
            messages::warning("blocking entries will be excluded from any submission");
        } else {
            messages::success("no blocking findings");
        }
    }
    Ok(())
}
