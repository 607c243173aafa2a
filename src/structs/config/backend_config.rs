use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    /// Backend selector: "none", "llama" or "onnx".
    #[serde(default = "ConfigHelper::default_backend")]
    pub backend: String,

    /// Completion server endpoint for the "llama" backend.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model directory for the "onnx" backend.
    #[serde(default)]
    pub model_dir: Option<String>,

    #[serde(default)]
    pub quantized: bool,

    #[serde(default = "ConfigHelper::default_threads")]
    pub threads: usize,

    #[serde(default = "ConfigHelper::default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend: ConfigHelper::default_backend(),
            endpoint: None,
            model_dir: None,
            quantized: false,
            threads: ConfigHelper::default_threads(),
            generate_timeout_secs: ConfigHelper::default_generate_timeout_secs(),
        }
    }
}
