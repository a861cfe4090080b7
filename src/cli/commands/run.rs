use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::driver::{CancelToken, DriverConfig, RunReport, SubmissionDriver};
use crate::core::pipeline;
use crate::errors::{AppError, AppResult};
use crate::report;
use crate::target::dry_run::DryRunSession;
use crate::target::http::HttpSession;
use crate::target::{Credentials, TargetSession};
use crate::ui::messages;
use std::io::{self, Write};
use std::path::Path;

/// Handle the `run` command: the full extract → validate → submit pipeline.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run {
        file,
        period,
        url,
        profile,
        dry_run,
        yes,
        json,
    } = cmd
    {
        // CLI overrides win over the config file
        let mut cfg = cfg.clone();
        if let Some(url) = url {
            cfg.target_url = url.clone();
        }
        if let Some(profile) = profile {
            cfg.profile_path = Some(profile.clone());
        }

        let period = period.as_deref().or(cfg.reporting_period.as_deref());
        let (mut batch, unparsed) = pipeline::build_batch(Path::new(file), period)?;
        let summary = pipeline::validate_batch(&mut batch, cfg.max_work_minutes);

        if batch.is_empty() {
            messages::warning("no entries extracted, nothing to submit");
            return Ok(());
        }
        if summary.has_blocking() {
            messages::warning(format!(
                "{} blocking entries will be excluded from the submission",
                summary.blocking
            ));
        }

        if !*dry_run {
            cfg.require_credentials()?;
            if !*yes && !confirm(&cfg.target_url, batch.len())? {
                messages::info("aborted by operator, nothing submitted");
                return Ok(());
            }
        }

        let credentials = Credentials {
            contract_id: cfg.contract_id.clone(),
            login_id: cfg.login_id.clone(),
            password: cfg.password.clone(),
        };
        let driver_cfg = DriverConfig::from_config(&cfg);
        let cancel = CancelToken::new();

        let run_report = if *dry_run {
            messages::info("dry run: no traffic will reach the target system");
            let session = DryRunSession::new();
            drive(session, driver_cfg, credentials, None, &mut batch, &cancel)
        } else {
            let session = HttpSession::new(&cfg)?;
            drive(
                session,
                driver_cfg,
                credentials,
                cfg.profile_path.clone(),
                &mut batch,
                &cancel,
            )
        };

        if *json {
            let out = report::to_json(&report::JsonReport {
                batch: &batch,
                summary: Some(&summary),
                unparsed: &unparsed,
            })?;
            println!("{}", out);
        } else {
            messages::header("Submission report");
            print!("{}", report::render_batch(&batch, true));
            println!();
            println!(
                "Planned {}, submitted {}, skipped {}, failed {}, pending {} (login attempts: {})",
                run_report.planned,
                run_report.submitted,
                run_report.skipped,
                run_report.failed,
                run_report.pending,
                run_report.login_attempts
            );
        }

        if let Some(reason) = &run_report.run_error {
            messages::error(format!(
                "run aborted: {}; session left open for inspection",
                reason
            ));
            return Err(AppError::Aborted(reason.clone()));
        }
        if run_report.cancelled {
            messages::warning("run cancelled; unstarted entries remain pending");
        } else if run_report.failed > 0 {
            messages::warning("run finished with failed entries, see report above");
        } else {
            messages::success("run finished");
        }
    }
    Ok(())
}

fn drive<S: TargetSession>(
    session: S,
    driver_cfg: DriverConfig,
    credentials: Credentials,
    profile: Option<String>,
    batch: &mut crate::models::Batch,
    cancel: &CancelToken,
) -> RunReport {
    let mut driver = SubmissionDriver::new(session, driver_cfg, credentials).with_profile(profile);
    driver.run(batch, cancel)
}

fn confirm(target_url: &str, entries: usize) -> AppResult<bool> {
    print!("Submit up to {} entries to {}? [y/N] ", entries, target_url);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
