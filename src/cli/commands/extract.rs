use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline;
use crate::errors::AppResult;
use crate::report;
use crate::ui::messages;
use std::path::Path;

/// Handle the `extract` command: normalize a source file and show the
/// resulting entries, without validating or submitting anything.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Extract { file, period, json } = cmd {
        let period = period.as_deref().or(cfg.reporting_period.as_deref());
        let (batch, unparsed) = pipeline::build_batch(Path::new(file), period)?;

        if *json {
            let out = report::to_json(&report::JsonReport {
                batch: &batch,
                summary: None,
                unparsed: &unparsed,
            })?;
            println!("{}", out);
            return Ok(());
        }

        messages::header(format!(
            "Extracted {} entries ({} .. {})",
            batch.len(),
            batch.period.first,
            batch.period.last
        ));
        print!("{}", report::render_batch(&batch, true));

        if !unparsed.is_empty() {
            messages::warning(format!("{} fragments could not be interpreted:", unparsed.len()));
            print!("{}", report::render_unparsed(&unparsed));
        }
    }
    Ok(())
}
