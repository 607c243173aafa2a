use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LogConfig {
    /// Patch artifact directory, resolved against the working directory.
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default)]
    pub retention_days: Option<u32>,
}
