use clap::Subcommand;
use crate::config::constants::DEFAULT_LOG_RETENTION_DAYS;
use crate::structs::cli::ScanOptions;

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a file or directory for security issues
    Scan {
        /// Root path to scan
        #[clap(default_value = ".")]
        path: String,

        #[clap(flatten)]
        options: ScanOptions,

        /// Review and apply suggested fixes interactively after the scan
        #[clap(short, long)]
        apply: bool,

        /// Print the report as JSON instead of the human-readable summary
        #[clap(long)]
        json: bool,
    },

    /// List the built-in detection rules
    Rules,

    /// Delete patch artifacts older than the retention window
    Sweep {
        /// Retention window in days
        #[clap(short, long, default_value_t = DEFAULT_LOG_RETENTION_DAYS)]
        days: u32,
    },

    /// Write a sample configuration file
    Init,
}
