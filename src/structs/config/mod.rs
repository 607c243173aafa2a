pub mod backend_config;
pub mod config;
pub mod log_config;
pub mod scan_config;
