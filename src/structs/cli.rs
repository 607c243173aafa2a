use clap::{Args, Parser};

use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "vigil")]
#[clap(about = "Security-focused source scanner with optional AI analysis", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Scan tunables. Every flag overrides the config file, which in turn
/// overrides the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanOptions {
    /// Extension allowlist, e.g. --ext .py --ext .ts (dot included)
    #[clap(long)]
    pub ext: Vec<String>,

    /// Skip files larger than this many megabytes
    #[clap(long)]
    pub max_file_mb: Option<f64>,

    /// Maximum lines per chunk
    #[clap(long)]
    pub chunk_lines: Option<usize>,

    /// Lines of overlap between consecutive chunks
    #[clap(long)]
    pub overlap_lines: Option<usize>,

    /// Reasoning effort hint forwarded to the model prompt
    #[clap(long)]
    pub reasoning: Option<String>,

    /// Sampling temperature forwarded to the model backend
    #[clap(long)]
    pub temperature: Option<f32>,

    /// Token budget per model response
    #[clap(long)]
    pub max_new_tokens: Option<usize>,

    /// Number of chunks analyzed concurrently
    #[clap(long)]
    pub workers: Option<usize>,
}
