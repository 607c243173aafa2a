use serde::{Deserialize, Serialize};

use crate::enums::severity::Severity;
use crate::enums::vuln_category::VulnCategory;

/// One finding, from either analysis path. The `id` is assigned when the
/// issue is written to the store at the end of a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    /// Set for rule-engine findings; model findings leave it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_type: Option<VulnCategory>,
    /// Opaque metadata attached by an enricher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<serde_json::Value>,
}

/// Exact snippet replacement: the first occurrence of `before` in the
/// target file becomes `after`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub before: String,
    pub after: String,
}

impl Fix {
    pub fn is_actionable(&self) -> bool {
        !self.before.is_empty() && !self.after.is_empty()
    }
}

impl Issue {
    pub fn has_actionable_fix(&self) -> bool {
        self.fix.as_ref().is_some_and(Fix::is_actionable)
    }
}
