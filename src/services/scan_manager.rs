use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::constants::{
    generate_timeout, retention_duration, DEFAULT_LOG_DIR_NAME, DEFAULT_LOG_RETENTION_DAYS,
};
use crate::enums::fix_outcome::{FixOutcome, RejectReason};
use crate::errors::VigilResult;
use crate::services::analyzer::Analyzer;
use crate::services::chunker::Chunker;
use crate::services::fix_applier::FixApplier;
use crate::services::issue_store::IssueStore;
use crate::services::model_backend::ModelBackend;
use crate::services::patch_log::PatchLog;
use crate::structs::config::config::Config;
use crate::structs::scan_report::ScanReport;
use crate::structs::scan_request::ScanRequest;
use crate::traits::issue_enricher::{IssueEnricher, PassthroughEnricher};

/// Ties chunking, analysis, the issue store and fix handling together for
/// one configured scanner instance.
pub struct ScanManager {
    analyzer: Analyzer,
    store: IssueStore,
    patch_log: PatchLog,
    enricher: Arc<dyn IssueEnricher>,
    retention: Duration,
    backend_name: &'static str,
}

impl ScanManager {
    pub fn new(config: &Config) -> Self {
        Self::with_enricher(config, Arc::new(PassthroughEnricher))
    }

    pub fn with_enricher(config: &Config, enricher: Arc<dyn IssueEnricher>) -> Self {
        let backend = Arc::new(ModelBackend::from_config(&config.backend));
        let backend_name = backend.name();
        let analyzer = Analyzer::new(
            backend,
            generate_timeout(config.backend.generate_timeout_secs),
        );

        let log_dir = config
            .logs
            .dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_LOG_DIR_NAME);
        let retention = retention_duration(
            config
                .logs
                .retention_days
                .unwrap_or(DEFAULT_LOG_RETENTION_DAYS),
        );

        Self {
            analyzer,
            store: IssueStore::new(),
            patch_log: PatchLog::new(PathBuf::from(log_dir)),
            enricher,
            retention,
            backend_name,
        }
    }

    /// Runs one full scan: chunk, analyze, enrich, store. The returned report
    /// carries the stored issues with their fresh ids.
    pub async fn scan(&self, request: &ScanRequest) -> VigilResult<ScanReport> {
        request.validate()?;
        self.patch_log.sweep(self.retention);

        log::info!(
            "🔍 Scanning {} (backend: {})",
            request.root.display(),
            self.backend_name
        );

        let chunks = Chunker::scan_project(request);
        let num_chunks = chunks.len();
        let num_files = chunks
            .iter()
            .map(|c| c.file_path.as_str())
            .collect::<HashSet<_>>()
            .len();
        log::info!("📄 {} files, {} chunks", num_files, num_chunks);

        let issues = self.analyzer.analyze_chunks(chunks, request).await;
        let enriched: Vec<_> = issues
            .into_iter()
            .map(|issue| self.enricher.enrich(issue))
            .collect();
        let stored = self.store.replace_all(enriched);

        Ok(ScanReport::new(num_files, num_chunks, stored))
    }

    /// Applies the stored fix for `issue_id`, recording a patch artifact on
    /// success. Fix paths resolve against the scanned directory, or the
    /// containing directory when a single file was scanned.
    pub fn apply_fix(&self, scan_root: &Path, issue_id: &str) -> FixOutcome {
        let Some(issue) = self.store.get(issue_id) else {
            return FixOutcome::Rejected {
                reason: RejectReason::UnknownIssue,
            };
        };

        let applier = FixApplier::new(Self::fix_root(scan_root));
        let outcome = applier.apply(&issue);

        if let FixOutcome::Applied { patch } = &outcome {
            let file_path = issue.file_path.as_deref().unwrap_or_default();
            if let Err(error) = self.patch_log.record(file_path, patch, &issue.title) {
                log::warn!("⚠️ Failed to record patch artifact: {}", error);
            }
        }

        outcome
    }

    fn fix_root(scan_root: &Path) -> PathBuf {
        if scan_root.is_file() {
            match scan_root.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        } else {
            scan_root.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fix_root_for_a_directory_is_the_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ScanManager::fix_root(dir.path()), dir.path());
    }

    #[test]
    fn fix_root_for_a_single_file_is_its_parent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("main.py");
        std::fs::write(&file, "x = 1\n").unwrap();
        assert_eq!(ScanManager::fix_root(&file), dir.path());
    }

    #[test]
    fn unknown_issue_id_is_rejected() {
        let manager = ScanManager::new(&Config::default());
        let outcome = manager.apply_fix(Path::new("."), "no-such-id");
        assert!(matches!(
            outcome,
            FixOutcome::Rejected {
                reason: RejectReason::UnknownIssue
            }
        ));
    }
}
