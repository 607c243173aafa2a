use serde::{Deserialize, Serialize};
use crate::structs::config::backend_config::BackendConfig;
use crate::structs::config::log_config::LogConfig;
use crate::structs::config::scan_config::ScanConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub logs: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            scan: ScanConfig::default(),
            logs: LogConfig::default(),
        }
    }
}
