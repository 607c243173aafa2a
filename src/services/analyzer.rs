use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::enums::severity::Severity;
use crate::prompts::analysis_prompt::render_prompt;
use crate::services::model_backend::ModelBackend;
use crate::services::rule_engine::RuleEngine;
use crate::structs::file_chunk::FileChunk;
use crate::structs::issue::{Fix, Issue};
use crate::structs::scan_request::ScanRequest;

/// Runs both analysis paths over every chunk: the rule engine always, the
/// model backend when one is enabled. Results are merged without
/// deduplication; the same defect may surface once per path.
pub struct Analyzer {
    backend: Arc<ModelBackend>,
    generate_timeout: Duration,
}

impl Analyzer {
    pub fn new(backend: Arc<ModelBackend>, generate_timeout: Duration) -> Self {
        Self { backend, generate_timeout }
    }

    /// Analyzes chunks with bounded concurrency, preserving chunk order in
    /// the merged output.
    pub async fn analyze_chunks(&self, chunks: Vec<FileChunk>, request: &ScanRequest) -> Vec<Issue> {
        let reasoning = request.reasoning.as_str();
        let temperature = request.temperature;
        let max_new_tokens = request.max_new_tokens;

        let per_chunk: Vec<Vec<Issue>> = stream::iter(chunks)
            .map(|chunk| async move {
                self.analyze_chunk(chunk, reasoning, temperature, max_new_tokens).await
            })
            .buffered(request.workers.max(1))
            .collect()
            .await;

        per_chunk.into_iter().flatten().collect()
    }

    async fn analyze_chunk(
        &self,
        chunk: FileChunk,
        reasoning: &str,
        temperature: f32,
        max_new_tokens: usize,
    ) -> Vec<Issue> {
        // Rule detection runs on the raw text so fixes carry snippets that
        // actually occur in the file; line numbers are re-based to the
        // chunk's absolute position.
        let base_line = chunk.start_line();
        let mut issues = RuleEngine::detect(&chunk.file_path, &chunk.raw_content());
        for issue in &mut issues {
            if let Some(line) = issue.line {
                issue.line = Some(base_line + line - 1);
            }
        }

        if self.backend.is_enabled() {
            if let Some(raw) = self.generate_with_timeout(&chunk, reasoning, temperature, max_new_tokens).await {
                for mut issue in parse_model_output(&raw) {
                    if issue.file_path.is_none() {
                        issue.file_path = Some(chunk.file_path.clone());
                    }
                    issues.push(issue);
                }
            }
        }

        issues
    }

    /// One model call on a blocking thread, capped by the configured
    /// timeout. Every failure mode degrades to `None`.
    async fn generate_with_timeout(
        &self,
        chunk: &FileChunk,
        reasoning: &str,
        temperature: f32,
        max_new_tokens: usize,
    ) -> Option<String> {
        let prompt = render_prompt(&chunk.language, &chunk.file_path, &chunk.content, reasoning);
        let backend = Arc::clone(&self.backend);
        let call = tokio::task::spawn_blocking(move || backend.generate(&prompt, max_new_tokens, temperature));

        match tokio::time::timeout(self.generate_timeout, call).await {
            Ok(Ok(Ok(text))) => Some(text),
            Ok(Ok(Err(e))) => {
                log::warn!("⚠️ Model generation failed for {} (chunk {}): {}", chunk.file_path, chunk.chunk_index, e);
                None
            }
            Ok(Err(e)) => {
                log::warn!("⚠️ Model generation task failed for {}: {}", chunk.file_path, e);
                None
            }
            Err(_) => {
                log::warn!("⚠️ Model generation timed out for {} (chunk {})", chunk.file_path, chunk.chunk_index);
                None
            }
        }
    }
}

/// Extracts the outermost JSON object from `output_text` and normalizes
/// its `issues` array. Prose around the object is tolerated; any shape or
/// syntax problem yields an empty list, never an error.
pub fn parse_model_output(output_text: &str) -> Vec<Issue> {
    let candidate = extract_json(output_text);
    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("⚠️ Model output is not valid JSON: {}", e);
            return Vec::new();
        }
    };
    let Some(items) = value.get("issues").and_then(Value::as_array) else {
        return Vec::new();
    };
    items.iter().filter_map(normalize_issue).collect()
}

/// Substring from the first `{` to the last `}`, or an empty object when
/// no such span exists.
fn extract_json(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => "{}",
    }
}

/// Coerces one array element into an `Issue`. Non-objects are dropped;
/// missing fields get defaults, unusable `fix` objects become `None`.
fn normalize_issue(value: &Value) -> Option<Issue> {
    let object = value.as_object()?;
    let fix = object.get("fix").and_then(|f| {
        Some(Fix {
            before: f.get("before")?.as_str()?.to_string(),
            after: f.get("after")?.as_str()?.to_string(),
        })
    });
    Some(Issue {
        id: None,
        title: non_empty_string(object.get("title")).unwrap_or_else(|| "Issue".to_string()),
        description: non_empty_string(object.get("description")).unwrap_or_default(),
        severity: object
            .get("severity")
            .and_then(Value::as_str)
            .map_or(Severity::Medium, Severity::parse_or_default),
        file_path: object.get("file_path").and_then(Value::as_str).map(str::to_string),
        line: object.get("line").and_then(Value::as_u64).map(|line| line as usize),
        suggestion: non_empty_string(object.get("suggestion")).unwrap_or_default(),
        fix,
        vulnerability_type: None,
        enrichment: None,
    })
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
