use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigSave)?;
            println!("{}", yaml);
        }

        // ---- CHECK CONFIG ----
        if *check {
            let missing = cfg.missing_fields();
            if missing.is_empty() {
                println!("✅ Configuration is complete.");
            } else {
                println!("⚠️  Missing required settings:");
                for field in missing {
                    println!("   - {}", field);
                }
            }
        }
    }
    Ok(())
}
