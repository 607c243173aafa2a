#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BackendKind {
    None,    // Rule-based detection only
    Llama,   // llama.cpp completion server over HTTP
    Onnx,    // In-process onnxruntime session
}

impl BackendKind {
    /// Maps a configured selector onto a backend. Unknown selectors
    /// deliberately fall back to `None` instead of failing the scan.
    pub fn from_selector(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "none" => BackendKind::None,
            "llama" | "llama_cpp" | "llama-server" => BackendKind::Llama,
            "onnx" => BackendKind::Onnx,
            other => {
                log::warn!("⚠️ Unknown model backend '{}', running with analysis disabled", other);
                BackendKind::None
            }
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        BackendKind::None
    }
}
