pub const BASE_INSTRUCTION: &str = "You are an expert software security and bug-finding AI. Analyze the provided code for memory/resource leaks, logical errors, runtime errors, security vulnerabilities, and bad practices. Respond in strict JSON with an array under key 'issues'. Each issue is an object with keys: 'title' (string), 'description' (string), 'severity' ('low'|'medium'|'high'|'critical'), 'file_path' (string), 'line' (int or null), 'suggestion' (string), and 'fix' (object or null). If a fix is possible, set 'fix' with keys: 'before' (string), 'after' (string) representing the exact before/after snippet to replace.";

/// Renders the per-chunk analysis prompt. `code_chunk` is the numbered
/// chunk body, so the model can cite absolute line numbers.
pub fn render_prompt(language: &str, file_path: &str, code_chunk: &str, reasoning: &str) -> String {
    format!(
        "Instructions:\n{}\n\nLanguage: {}\nFile: {}\nReasoningEffort: {}\nCode (with line numbers):\n```\n{}\n```\nOutput JSON only with keys {{\"issues\": [...]}} and no extra text.",
        BASE_INSTRUCTION, language, file_path, reasoning, code_chunk
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_code() {
        let prompt = render_prompt("Python", "src/app.py", "00001: import os", "medium");
        assert!(prompt.starts_with("Instructions:\n"));
        assert!(prompt.contains("Language: Python\n"));
        assert!(prompt.contains("File: src/app.py\n"));
        assert!(prompt.contains("ReasoningEffort: medium\n"));
        assert!(prompt.contains("```\n00001: import os\n```"));
        assert!(prompt.contains("{\"issues\": [...]}"));
    }
}
