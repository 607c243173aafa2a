use crate::config::constants::{DEFAULT_GENERATE_TIMEOUT_SECS, DEFAULT_INFERENCE_THREADS};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_backend() -> String {
        "none".to_string()
    }

    pub fn default_threads() -> usize {
        DEFAULT_INFERENCE_THREADS
    }

    pub fn default_generate_timeout_secs() -> u64 {
        DEFAULT_GENERATE_TIMEOUT_SECS
    }
}
