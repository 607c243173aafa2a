use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ndarray::{Array2, Axis};
use ort::session::{builder::GraphOptimizationLevel, Session, SessionInputs};
use ort::value::{DynTensor, Tensor};
use tokenizers::Tokenizer;

use crate::errors::{VigilError, VigilResult};
use crate::structs::config::backend_config::BackendConfig;

const MODEL_FILE: &str = "model.onnx";
const QUANTIZED_MODEL_FILE: &str = "model_quantized.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// End-of-sequence token names probed against the tokenizer, in order.
const EOS_CANDIDATES: &[&str] = &["</s>", "<|endoftext|>", "<|end|>", "<eos>"];

/// Local text generator backed by an ONNX Runtime session.
///
/// The session is not thread safe, so it sits behind a mutex and generation
/// requests serialize on it. Decoding is greedy; the sampling temperature the
/// remote backend honors does not apply here.
pub struct OnnxGenerator {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    eos_id: Option<u32>,
}

impl OnnxGenerator {
    pub fn from_config(config: &BackendConfig) -> VigilResult<Self> {
        let Some(model_dir) = config.model_dir.as_deref().filter(|d| !d.is_empty()) else {
            return Err(VigilError::config_error(
                "onnx backend requires a model directory",
                Some("backend.model_dir"),
                Some("point model_dir at a directory holding model.onnx and tokenizer.json"),
            ));
        };

        let model_dir = Path::new(model_dir);
        let model_path = Self::resolve_model_file(model_dir, config.quantized);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);
        if !model_path.exists() || !tokenizer_path.exists() {
            return Err(VigilError::backend_error(
                "onnx",
                &format!(
                    "model files missing under {}, expected {} and {}",
                    model_dir.display(),
                    model_path.display(),
                    tokenizer_path.display()
                ),
            ));
        }

        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.with_intra_threads(config.threads.max(1)))
            .and_then(|builder| builder.commit_from_file(&model_path))
            .map_err(|e| {
                VigilError::backend_error("onnx", &format!("failed to load model: {}", e))
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            VigilError::backend_error("onnx", &format!("failed to load tokenizer: {}", e))
        })?;

        let eos_id = EOS_CANDIDATES
            .iter()
            .find_map(|token| tokenizer.token_to_id(token));
        if eos_id.is_none() {
            log::warn!("⚠️ Tokenizer has no known end-of-sequence token, generation always runs to the token limit");
        }

        log::info!("🔧 Loaded ONNX model from {}", model_path.display());

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            eos_id,
        })
    }

    /// Greedy token-by-token decoding. The full sequence is re-run every step,
    /// which keeps the session interface simple at the cost of speed; the
    /// models this backend targets are small local scanners, not chat stacks.
    pub fn generate(&self, prompt: &str, max_new_tokens: usize) -> VigilResult<String> {
        let encoding = self.tokenizer.encode(prompt, true).map_err(|e| {
            VigilError::backend_error("onnx", &format!("tokenization failed: {}", e))
        })?;

        let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let prompt_len = ids.len();
        if prompt_len == 0 {
            return Ok(String::new());
        }

        let mut session = self
            .session
            .lock()
            .map_err(|_| VigilError::backend_error("onnx", "inference session lock poisoned"))?;

        for _ in 0..max_new_tokens {
            let next = Self::next_token(&mut session, &ids)?;
            if self.eos_id.is_some_and(|eos| next == i64::from(eos)) {
                break;
            }
            ids.push(next);
        }
        drop(session);

        let generated: Vec<u32> = ids[prompt_len..].iter().map(|&id| id as u32).collect();
        self.tokenizer
            .decode(&generated, true)
            .map_err(|e| VigilError::backend_error("onnx", &format!("decoding failed: {}", e)))
    }

    fn resolve_model_file(model_dir: &Path, quantized: bool) -> PathBuf {
        if quantized {
            let candidate = model_dir.join(QUANTIZED_MODEL_FILE);
            if candidate.exists() {
                return candidate;
            }
            log::warn!(
                "⚠️ Quantized model not found at {}, falling back to {}",
                candidate.display(),
                MODEL_FILE
            );
        }
        model_dir.join(MODEL_FILE)
    }

    /// Runs one forward pass over the whole sequence and picks the
    /// highest-scoring token from the last logits row.
    fn next_token(session: &mut Session, ids: &[i64]) -> VigilResult<i64> {
        let seq_len = ids.len();
        // Collected up front so the feed loop does not borrow the session.
        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();

        let ids_array = Array2::from_shape_vec((1, seq_len), ids.to_vec())
            .map_err(|e| VigilError::backend_error("onnx", &format!("input shape error: {}", e)))?;
        let mask_array = Array2::<i64>::ones((1, seq_len));
        let position_array = Array2::from_shape_vec((1, seq_len), (0..seq_len as i64).collect())
            .map_err(|e| VigilError::backend_error("onnx", &format!("input shape error: {}", e)))?;

        let mut feed: HashMap<String, DynTensor> = HashMap::new();
        for name in input_names {
            let array = match name.as_str() {
                "input_ids" => ids_array.clone(),
                "attention_mask" => mask_array.clone(),
                "position_ids" => position_array.clone(),
                _ => continue,
            };
            let tensor = Tensor::from_array(array.into_dyn())
                .map_err(|e| {
                    VigilError::backend_error("onnx", &format!("tensor build failed: {}", e))
                })?
                .upcast();
            feed.insert(name, tensor);
        }

        let outputs = session
            .run(SessionInputs::from(feed))
            .map_err(|e| VigilError::backend_error("onnx", &format!("forward pass failed: {}", e)))?;
        if outputs.len() == 0 {
            return Err(VigilError::backend_error("onnx", "model returned no outputs"));
        }

        let logits = outputs[0].try_extract_array::<f32>().map_err(|e| {
            VigilError::backend_error("onnx", &format!("failed to decode logits: {}", e))
        })?;
        if logits.ndim() != 3 {
            return Err(VigilError::backend_error(
                "onnx",
                &format!("unexpected logits shape {:?}", logits.shape()),
            ));
        }

        let sample = logits.index_axis(Axis(0), 0);
        let steps = sample.len_of(Axis(0));
        if steps == 0 {
            return Err(VigilError::backend_error("onnx", "model returned empty logits"));
        }
        let row = sample.index_axis(Axis(0), steps - 1);

        let mut best = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (idx, score) in row.iter().enumerate() {
            if *score > best_score {
                best_score = *score;
                best = idx;
            }
        }

        Ok(best as i64)
    }
}
