use std::path::PathBuf;

use crate::config::constants::{
    DEFAULT_ANALYSIS_WORKERS, DEFAULT_CHUNK_MAX_LINES, DEFAULT_CHUNK_OVERLAP_LINES,
    DEFAULT_INCLUDE_EXTENSIONS, DEFAULT_MAX_FILE_MB, DEFAULT_MAX_NEW_TOKENS,
    DEFAULT_REASONING_EFFORT, DEFAULT_TEMPERATURE,
};
use crate::errors::{VigilError, VigilResult};
use crate::structs::config::scan_config::ScanConfig;

/// Everything one scan run needs: the root plus chunking and analysis
/// tunables.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub root: PathBuf,
    /// Filename suffixes (dot included) a file must match to be scanned.
    pub include_exts: Vec<String>,
    pub max_file_mb: f64,
    pub chunk_max_lines: usize,
    pub chunk_overlap_lines: usize,
    pub reasoning: String,
    pub temperature: f32,
    pub max_new_tokens: usize,
    pub workers: usize,
}

impl ScanRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_exts: DEFAULT_INCLUDE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_file_mb: DEFAULT_MAX_FILE_MB,
            chunk_max_lines: DEFAULT_CHUNK_MAX_LINES,
            chunk_overlap_lines: DEFAULT_CHUNK_OVERLAP_LINES,
            reasoning: DEFAULT_REASONING_EFFORT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            workers: DEFAULT_ANALYSIS_WORKERS,
        }
    }

    /// Applies config-file overrides on top of the defaults. CLI flags are
    /// layered afterwards by the caller.
    pub fn apply_config(mut self, scan: &ScanConfig) -> Self {
        if let Some(exts) = &scan.include_exts {
            self.include_exts = exts.clone();
        }
        if let Some(max_file_mb) = scan.max_file_mb {
            self.max_file_mb = max_file_mb;
        }
        if let Some(chunk_max_lines) = scan.chunk_max_lines {
            self.chunk_max_lines = chunk_max_lines;
        }
        if let Some(chunk_overlap_lines) = scan.chunk_overlap_lines {
            self.chunk_overlap_lines = chunk_overlap_lines;
        }
        if let Some(reasoning) = &scan.reasoning {
            self.reasoning = reasoning.clone();
        }
        if let Some(temperature) = scan.temperature {
            self.temperature = temperature;
        }
        if let Some(max_new_tokens) = scan.max_new_tokens {
            self.max_new_tokens = max_new_tokens;
        }
        if let Some(workers) = scan.workers {
            self.workers = workers;
        }
        self
    }

    pub fn max_file_bytes(&self) -> u64 {
        (self.max_file_mb * 1024.0 * 1024.0) as u64
    }

    pub fn validate(&self) -> VigilResult<()> {
        if self.chunk_max_lines == 0 {
            return Err(VigilError::validation_error(
                "chunk_max_lines",
                "0",
                "must be greater than zero",
                None,
            ));
        }
        if self.chunk_overlap_lines >= self.chunk_max_lines {
            return Err(VigilError::validation_error(
                "chunk_overlap_lines",
                &self.chunk_overlap_lines.to_string(),
                "must be smaller than chunk_max_lines",
                Some("lower the overlap or raise the chunk size"),
            ));
        }
        if self.workers == 0 {
            return Err(VigilError::validation_error(
                "workers",
                "0",
                "must be greater than zero",
                None,
            ));
        }
        Ok(())
    }
}
