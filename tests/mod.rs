use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use vigil_cli::enums::fix_outcome::{FixOutcome, RejectReason};
use vigil_cli::enums::severity::Severity;
use vigil_cli::enums::vuln_category::VulnCategory;
use vigil_cli::errors::VigilError;
use vigil_cli::services::scan_manager::ScanManager;
use vigil_cli::structs::config::config::Config;
use vigil_cli::structs::issue::Issue;
use vigil_cli::structs::scan_report::ScanReport;
use vigil_cli::structs::scan_request::ScanRequest;
use vigil_cli::traits::issue_enricher::IssueEnricher;

const APP_PY: &str = r#"import os
import random

# password = "disabled123"
password = "admin123"
user_id = 7
query = f"SELECT * FROM users WHERE id = {user_id}"
token_seed = random.random()
"#;

fn project_with_app(dir: &TempDir) -> ScanRequest {
    fs::write(dir.path().join("app.py"), APP_PY).expect("write app.py");
    ScanRequest::new(dir.path())
}

fn config_with_logs(logs_dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.logs.dir = Some(logs_dir.to_string_lossy().to_string());
    config
}

fn find_kind<'a>(report: &'a ScanReport, kind: VulnCategory) -> &'a Issue {
    report
        .issues
        .iter()
        .find(|i| i.vulnerability_type == Some(kind))
        .expect("expected finding kind present")
}

#[tokio::test]
async fn scan_reports_rule_findings_with_ids_and_paths() {
    let dir = TempDir::new().expect("tempdir");
    let request = project_with_app(&dir);
    let manager = ScanManager::new(&Config::default());

    let report = manager.scan(&request).await.expect("scan");

    assert_eq!(report.num_files, 1);
    assert_eq!(report.num_chunks, 1);
    assert_eq!(report.num_issues, 3);
    assert!(report.issues.iter().all(|i| i.id.is_some()));
    assert!(report
        .issues
        .iter()
        .all(|i| i.file_path.as_deref() == Some("app.py")));

    let secrets = find_kind(&report, VulnCategory::HardcodedSecrets);
    assert_eq!(secrets.severity, Severity::Critical);
    assert_eq!(secrets.line, Some(5));
    assert!(secrets.has_actionable_fix());

    let sql = find_kind(&report, VulnCategory::SqlInjection);
    assert_eq!(sql.severity, Severity::High);
    assert_eq!(sql.line, Some(7));

    let random = find_kind(&report, VulnCategory::InsecureRandom);
    assert_eq!(random.severity, Severity::Medium);
    assert_eq!(random.line, Some(8));

    assert_eq!(report.severity_counts.get(&Severity::Critical), Some(&1));
    assert_eq!(report.severity_counts.get(&Severity::High), Some(&1));
    assert_eq!(report.severity_counts.get(&Severity::Medium), Some(&1));
}

#[tokio::test]
async fn apply_fix_rewrites_file_and_records_patch_artifact() {
    let dir = TempDir::new().expect("tempdir");
    let logs = TempDir::new().expect("logs tempdir");
    let request = project_with_app(&dir);
    let manager = ScanManager::new(&config_with_logs(logs.path()));

    let report = manager.scan(&request).await.expect("scan");
    let id = find_kind(&report, VulnCategory::HardcodedSecrets)
        .id
        .clone()
        .expect("issue id");

    let outcome = manager.apply_fix(&request.root, &id);
    assert!(matches!(outcome, FixOutcome::Applied { .. }));

    let rewritten = fs::read_to_string(dir.path().join("app.py")).expect("read app.py");
    assert!(rewritten.contains("password = os.getenv(\"PASSWORD\", \"\")"));
    assert!(!rewritten.contains("password = \"admin123\""));
    // The commented-out line is untouched.
    assert!(rewritten.contains("# password = \"disabled123\""));

    let artifacts: Vec<_> = fs::read_dir(logs.path())
        .expect("read logs dir")
        .flatten()
        .map(|e| e.path())
        .collect();
    assert_eq!(artifacts.len(), 1);
    let name = artifacts[0]
        .file_name()
        .expect("artifact name")
        .to_string_lossy()
        .to_string();
    assert!(name.ends_with("_app.py.diff"), "unexpected artifact: {}", name);

    let body = fs::read_to_string(&artifacts[0]).expect("read artifact");
    assert!(body.contains("--- app.py (before)"));
    assert!(body.contains("Note: Hardcoded Secret Detected"));

    // Applying the same fix again finds nothing left to replace.
    assert!(matches!(
        manager.apply_fix(&request.root, &id),
        FixOutcome::Rejected {
            reason: RejectReason::SnippetNotFound
        }
    ));
}

#[tokio::test]
async fn rescan_invalidates_old_ids_and_keeps_fresh_artifacts() {
    let dir = TempDir::new().expect("tempdir");
    let logs = TempDir::new().expect("logs tempdir");
    let request = project_with_app(&dir);
    let manager = ScanManager::new(&config_with_logs(logs.path()));

    let first = manager.scan(&request).await.expect("first scan");
    let secrets_id = find_kind(&first, VulnCategory::HardcodedSecrets)
        .id
        .clone()
        .expect("secrets id");

    assert!(matches!(
        manager.apply_fix(&request.root, &secrets_id),
        FixOutcome::Applied { .. }
    ));

    let second = manager.scan(&request).await.expect("second scan");
    assert_eq!(second.num_issues, 2);
    assert!(second
        .issues
        .iter()
        .all(|i| i.vulnerability_type != Some(VulnCategory::HardcodedSecrets)));

    // Ids from the first scan no longer resolve.
    assert!(matches!(
        manager.apply_fix(&request.root, &secrets_id),
        FixOutcome::Rejected {
            reason: RejectReason::UnknownIssue
        }
    ));

    // The retention sweep during the second scan kept the fresh artifact.
    let artifacts = fs::read_dir(logs.path()).expect("read logs dir").flatten().count();
    assert_eq!(artifacts, 1);
}

struct TeamTagger;

impl IssueEnricher for TeamTagger {
    fn enrich(&self, mut issue: Issue) -> Issue {
        issue.enrichment = Some(serde_json::json!({ "team": "appsec" }));
        issue
    }
}

#[tokio::test]
async fn custom_enricher_annotates_every_stored_issue() {
    let dir = TempDir::new().expect("tempdir");
    let request = project_with_app(&dir);
    let manager = ScanManager::with_enricher(&Config::default(), Arc::new(TeamTagger));

    let report = manager.scan(&request).await.expect("scan");
    assert_eq!(report.num_issues, 3);
    for issue in &report.issues {
        let enrichment = issue.enrichment.as_ref().expect("enrichment set");
        assert_eq!(enrichment["team"], "appsec");
    }
}

#[tokio::test]
async fn unknown_backend_selector_downgrades_to_rule_only_scan() {
    let dir = TempDir::new().expect("tempdir");
    let request = project_with_app(&dir);

    let mut config = Config::default();
    config.backend.backend = "quantum".to_string();
    let manager = ScanManager::new(&config);

    let report = manager.scan(&request).await.expect("scan");
    assert_eq!(report.num_issues, 3);
}

#[tokio::test]
async fn invalid_overlap_fails_validation_before_scanning() {
    let dir = TempDir::new().expect("tempdir");
    let mut request = project_with_app(&dir);
    request.chunk_overlap_lines = request.chunk_max_lines;

    let manager = ScanManager::new(&Config::default());
    let error = manager.scan(&request).await.expect_err("validation error");
    assert!(matches!(error, VigilError::ValidationError { .. }));
}

#[tokio::test]
async fn single_file_roots_are_scanned_directly() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("solo.py");
    fs::write(&file, "password = \"hunter2\"\n").expect("write solo.py");

    let manager = ScanManager::new(&Config::default());
    let request = ScanRequest::new(&file);
    let report = manager.scan(&request).await.expect("scan");

    assert_eq!(report.num_files, 1);
    assert_eq!(report.num_issues, 1);
    assert_eq!(report.issues[0].file_path.as_deref(), Some("solo.py"));
    assert_eq!(
        report.issues[0].vulnerability_type,
        Some(VulnCategory::HardcodedSecrets)
    );
}

#[tokio::test]
async fn report_serializes_with_lowercase_severity_keys() {
    let dir = TempDir::new().expect("tempdir");
    let request = project_with_app(&dir);
    let manager = ScanManager::new(&Config::default());

    let report = manager.scan(&request).await.expect("scan");
    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["num_files"], 1);
    assert_eq!(json["num_issues"], 3);
    assert_eq!(json["severity_counts"]["critical"], 1);
    assert!(json["issues"].as_array().is_some());
}
