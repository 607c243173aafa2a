use std::fs;
use std::path::PathBuf;

use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{VigilError, VigilResult};
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# Vigil configuration
#
# Scanning and rule-based detection work without this file. The generative
# backend stays disabled until one is configured here.

[backend]
# Generative analysis backend: "none", "llama" or "onnx"
backend = "none"

# llama.cpp completion server endpoint, used when backend = "llama"
# endpoint = "http://127.0.0.1:8080"

# Directory containing model.onnx (or model_quantized.onnx) and
# tokenizer.json, used when backend = "onnx"
# model_dir = "/path/to/model"

# quantized = false
# threads = 6
# generate_timeout_secs = 120

[scan]
# include_exts = [".py", ".js", ".jsx", ".ts", ".tsx", ".sol"]
# max_file_mb = 1.5
# chunk_max_lines = 400
# chunk_overlap_lines = 40
# reasoning = "medium"
# temperature = 0.2
# max_new_tokens = 1200
# workers = 4

[logs]
# dir = "fix_logs"
# retention_days = 14
"#;

pub struct ConfigManager;

impl ConfigManager {
    /// Loads `~/.vigil/config.toml`. A missing or malformed file is never
    /// fatal: the scanner starts with defaults and a disabled backend.
    pub fn load() -> Config {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("⚠️ Failed to load configuration, falling back to defaults: {}", e);
                Config::default()
            }
        }
    }

    fn try_load() -> VigilResult<Config> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };
        if !path.exists() {
            log::debug!("📋 No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        log::debug!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Writes the commented sample configuration, refusing to overwrite an
    /// existing file.
    pub fn create_sample_config() -> VigilResult<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            VigilError::config_error("could not resolve the home directory", None, None)
        })?;
        if path.exists() {
            return Err(VigilError::config_error(
                "configuration file already exists",
                Some("path"),
                Some("edit the existing file, or delete it to regenerate the sample"),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, SAMPLE_CONFIG)?;
        Ok(path)
    }
}
