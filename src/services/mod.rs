pub mod analyzer;
pub mod chunker;
pub mod fix_applier;
pub mod issue_store;
pub mod model_backend;
#[cfg(feature = "onnx")]
pub mod onnx_generator;
pub mod patch_log;
pub mod rule_engine;
pub mod scan_manager;
