pub mod cli;
pub mod config;
pub mod file_chunk;
pub mod issue;
pub mod scan_report;
pub mod scan_request;
