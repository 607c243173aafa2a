use std::time::Duration;

pub const DEFAULT_MAX_FILE_MB: f64 = 1.5;
pub const DEFAULT_CHUNK_MAX_LINES: usize = 400;
pub const DEFAULT_CHUNK_OVERLAP_LINES: usize = 40;
pub const DEFAULT_REASONING_EFFORT: &str = "medium";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_NEW_TOKENS: usize = 1200;
pub const DEFAULT_ANALYSIS_WORKERS: usize = 4;
pub const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 14;
pub const DEFAULT_INFERENCE_THREADS: usize = 6;
pub const TEXT_PROBE_BYTES: usize = 2048;

pub const CONFIG_DIR_NAME: &str = ".vigil";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_LOG_DIR_NAME: &str = "fix_logs";

pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[".py", ".js", ".jsx", ".ts", ".tsx", ".sol"];

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("sol", "Solidity"),
];

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Display language for a path, matched on its (lowercased) extension.
pub fn language_for_path(path: &str) -> &'static str {
    let lower = path.to_lowercase();
    SUPPORTED_FILE_EXTENSIONS
        .iter()
        .find(|(ext, _)| lower.ends_with(&format!(".{}", ext)))
        .map_or(UNKNOWN_LANGUAGE, |(_, language)| language)
}

pub fn retention_duration(days: u32) -> Duration {
    Duration::from_secs(u64::from(days) * 24 * 60 * 60)
}

pub fn generate_timeout(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
