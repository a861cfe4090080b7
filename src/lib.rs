//! attendsync library root.
//! Exposes the CLI parser, the high-level run() function, and the pipeline
//! modules (normalizer, validator, planner, driver).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod report;
pub mod source;
pub mod target;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::PathBuf;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Extract { .. } => cli::commands::extract::handle(&cli.command, cfg),
        Commands::Validate { .. } => cli::commands::validate::handle(&cli.command, cfg),
        Commands::Run { .. } => cli::commands::run::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once, honoring the --config override
    let cfg = match &cli.config {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load()?,
    };

    dispatch(&cli, &cfg)
}
