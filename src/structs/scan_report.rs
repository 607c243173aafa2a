use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::severity::Severity;
use crate::structs::issue::Issue;

/// Summary of one completed scan. `num_files` counts distinct files that
/// produced chunks, not files visited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub num_files: usize,
    pub num_chunks: usize,
    pub num_issues: usize,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub issues: Vec<Issue>,
}

impl ScanReport {
    pub fn new(num_files: usize, num_chunks: usize, issues: Vec<Issue>) -> Self {
        let mut severity_counts = BTreeMap::new();
        for issue in &issues {
            *severity_counts.entry(issue.severity).or_insert(0) += 1;
        }
        Self {
            num_files,
            num_chunks,
            num_issues: issues.len(),
            severity_counts,
            issues,
        }
    }

    /// Issues carrying a usable before/after snippet, in report order.
    pub fn fixable_issues(&self) -> Vec<&Issue> {
        self.issues.iter().filter(|issue| issue.has_actionable_fix()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::issue::Fix;

    fn issue(severity: Severity, fix: Option<Fix>) -> Issue {
        Issue {
            id: None,
            title: "t".to_string(),
            description: String::new(),
            severity,
            file_path: None,
            line: None,
            suggestion: String::new(),
            fix,
            vulnerability_type: None,
            enrichment: None,
        }
    }

    #[test]
    fn severity_counts_cover_all_issues() {
        let report = ScanReport::new(
            2,
            3,
            vec![
                issue(Severity::High, None),
                issue(Severity::High, None),
                issue(Severity::Critical, None),
            ],
        );
        assert_eq!(report.num_issues, 3);
        assert_eq!(report.severity_counts.get(&Severity::High), Some(&2));
        assert_eq!(report.severity_counts.get(&Severity::Critical), Some(&1));
        assert_eq!(report.severity_counts.get(&Severity::Low), None);
    }

    #[test]
    fn fixable_issues_require_actionable_snippets() {
        let fix = Fix { before: "a".to_string(), after: "b".to_string() };
        let report = ScanReport::new(
            1,
            1,
            vec![issue(Severity::Low, Some(fix)), issue(Severity::Low, None)],
        );
        assert_eq!(report.fixable_issues().len(), 1);
    }

    #[test]
    fn report_serializes_with_string_severity_keys() {
        let report = ScanReport::new(1, 1, vec![issue(Severity::Medium, None)]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"medium\":1"));
    }
}
