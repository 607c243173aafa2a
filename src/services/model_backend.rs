use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::enums::backend_kind::BackendKind;
use crate::errors::VigilResult;
#[cfg(feature = "onnx")]
use crate::services::onnx_generator::OnnxGenerator;
use crate::structs::config::backend_config::BackendConfig;

/// Canonical empty result, also what the disabled backend returns.
pub const EMPTY_ISSUES_JSON: &str = r#"{"issues": []}"#;

/// Text generation behind the analyzer. Selection and construction never
/// fail: anything missing or broken downgrades to `Disabled`, which
/// produces an empty issues document.
pub enum ModelBackend {
    Disabled,
    LlamaServer(LlamaServerClient),
    #[cfg(feature = "onnx")]
    Onnx(OnnxGenerator),
}

impl ModelBackend {
    pub fn from_config(config: &BackendConfig) -> Self {
        match BackendKind::from_selector(&config.backend) {
            BackendKind::None => ModelBackend::Disabled,
            BackendKind::Llama => match LlamaServerClient::from_config(config) {
                Some(client) => ModelBackend::LlamaServer(client),
                None => ModelBackend::Disabled,
            },
            #[cfg(feature = "onnx")]
            BackendKind::Onnx => match OnnxGenerator::from_config(config) {
                Ok(generator) => ModelBackend::Onnx(generator),
                Err(e) => {
                    log::warn!("⚠️ Failed to initialize the onnx backend, analysis runs disabled: {}", e);
                    ModelBackend::Disabled
                }
            },
            #[cfg(not(feature = "onnx"))]
            BackendKind::Onnx => {
                log::warn!("⚠️ Backend 'onnx' requested but this build does not include the onnx feature");
                ModelBackend::Disabled
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ModelBackend::Disabled)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelBackend::Disabled => "disabled",
            ModelBackend::LlamaServer(_) => "llama-server",
            #[cfg(feature = "onnx")]
            ModelBackend::Onnx(_) => "onnx",
        }
    }

    /// Single generation call. Blocking; callers dispatch it on a blocking
    /// thread and impose their own timeout.
    pub fn generate(&self, prompt: &str, max_new_tokens: usize, temperature: f32) -> VigilResult<String> {
        match self {
            ModelBackend::Disabled => Ok(EMPTY_ISSUES_JSON.to_string()),
            ModelBackend::LlamaServer(client) => client.complete(prompt, max_new_tokens, temperature),
            #[cfg(feature = "onnx")]
            ModelBackend::Onnx(generator) => generator.generate(prompt, max_new_tokens),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Minimal client for a llama.cpp completion server.
pub struct LlamaServerClient {
    endpoint: String,
    client: OnceCell<reqwest::blocking::Client>,
}

impl LlamaServerClient {
    fn from_config(config: &BackendConfig) -> Option<Self> {
        let endpoint = match config.endpoint.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => {
                log::warn!("⚠️ Backend 'llama' requested without an endpoint, analysis runs disabled");
                return None;
            }
        };
        Some(Self { endpoint, client: OnceCell::new() })
    }

    fn complete(&self, prompt: &str, max_new_tokens: usize, temperature: f32) -> VigilResult<String> {
        // Built on first use so the blocking client is never constructed on
        // the async runtime. Request timeouts are the caller's job.
        let client = self.client.get_or_try_init(|| {
            reqwest::blocking::Client::builder().timeout(None::<Duration>).build()
        })?;
        let response = client
            .post(format!("{}/completion", self.endpoint))
            .json(&CompletionRequest {
                prompt,
                n_predict: max_new_tokens,
                temperature,
                stream: false,
            })
            .send()?
            .error_for_status()?;
        let completion: CompletionResponse = response.json()?;
        Ok(completion.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analyzer::parse_model_output;

    fn config(backend: &str) -> BackendConfig {
        BackendConfig {
            backend: backend.to_string(),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn default_config_is_disabled() {
        let backend = ModelBackend::from_config(&BackendConfig::default());
        assert!(!backend.is_enabled());
        assert_eq!(backend.name(), "disabled");
    }

    #[test]
    fn disabled_backend_returns_a_parsable_empty_document() {
        let backend = ModelBackend::from_config(&config("none"));
        let output = backend.generate("anything", 16, 0.2).unwrap();
        assert_eq!(output, EMPTY_ISSUES_JSON);
        assert!(parse_model_output(&output).is_empty());
    }

    #[test]
    fn unknown_selector_downgrades_to_disabled() {
        let backend = ModelBackend::from_config(&config("transformers"));
        assert!(!backend.is_enabled());
    }

    #[test]
    fn llama_without_endpoint_downgrades_to_disabled() {
        let backend = ModelBackend::from_config(&config("llama"));
        assert!(!backend.is_enabled());
    }

    #[test]
    fn llama_with_endpoint_is_enabled_without_network_io() {
        let mut cfg = config("llama");
        cfg.endpoint = Some("http://127.0.0.1:8080/".to_string());
        let backend = ModelBackend::from_config(&cfg);
        assert!(backend.is_enabled());
        assert_eq!(backend.name(), "llama-server");
    }
}
