use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use std::path::PathBuf;

/// Handle the `init` command: create the config directory and write a
/// default configuration file for the user to fill in.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = match &cli.config {
        Some(custom) => PathBuf::from(custom),
        None => Config::config_file(),
    };

    println!("⚙️  Initializing attendsync…");
    Config::init(&path)?;
    println!("📄 Config file : {}", path.display());
    println!("✅ Configuration created. Fill in target_url and credentials before running.");

    Ok(())
}
