use serde::{Deserialize, Serialize};

/// Optional overrides for the built-in scan defaults. Unset fields fall
/// back to the defaults in `config::constants`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScanConfig {
    #[serde(default)]
    pub include_exts: Option<Vec<String>>,

    #[serde(default)]
    pub max_file_mb: Option<f64>,

    #[serde(default)]
    pub chunk_max_lines: Option<usize>,

    #[serde(default)]
    pub chunk_overlap_lines: Option<usize>,

    #[serde(default)]
    pub reasoning: Option<String>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_new_tokens: Option<usize>,

    #[serde(default)]
    pub workers: Option<usize>,
}
