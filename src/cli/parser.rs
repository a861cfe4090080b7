use clap::{Parser, Subcommand};

/// Command-line interface definition for attendsync
/// CLI application to normalize, validate and submit attendance records
#[derive(Parser)]
#[command(
    name = "attendsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Normalize recognized attendance records, validate them and submit them into a web attendance system",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration for missing fields")]
        check: bool,
    },

    /// Extract attendance entries from a source file (no validation)
    Extract {
        /// Source file with recognized fragments (.csv or .json)
        file: String,

        /// Reporting period (YYYY-MM); defaults to the document context
        /// or the current month
        #[arg(long = "period")]
        period: Option<String>,

        /// Print the result as JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Extract and validate, without submitting anything
    Validate {
        /// Source file with recognized fragments (.csv or .json)
        file: String,

        #[arg(long = "period")]
        period: Option<String>,

        #[arg(long = "json")]
        json: bool,
    },

    /// Full pipeline: extract, validate and submit to the target system
    Run {
        /// Source file with recognized fragments (.csv or .json)
        file: String,

        #[arg(long = "period")]
        period: Option<String>,

        /// Override the target attendance page URL
        #[arg(long = "url", short = 'u')]
        url: Option<String>,

        /// Override the persisted session profile path
        #[arg(long = "profile", short = 'p')]
        profile: Option<String>,

        /// Plan and report without touching the target system
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Skip the confirmation prompt before submitting
        #[arg(long = "yes", short = 'y')]
        yes: bool,

        #[arg(long = "json")]
        json: bool,
    },
}
