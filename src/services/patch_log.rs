use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::Local;

use crate::errors::{VigilError, VigilResult};

/// Append-only directory of applied-fix artifacts. Each applied fix becomes
/// one timestamped `.diff` file; sweeping removes artifacts older than the
/// configured retention and never fails a scan.
pub struct PatchLog {
    dir: PathBuf,
}

impl PatchLog {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn record(&self, file_path: &str, patch: &str, note: &str) -> VigilResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            VigilError::file_error(
                &self.dir.to_string_lossy(),
                "create patch log directory",
                &e.to_string(),
            )
        })?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let base_name = Path::new(file_path)
            .file_name()
            .map_or_else(|| file_path.to_string(), |n| n.to_string_lossy().to_string());
        let artifact = self.dir.join(format!("{}_{}.diff", timestamp, base_name));

        let body = format!("{}\nNote: {}\n", patch, note);
        fs::write(&artifact, body).map_err(|e| {
            VigilError::file_error(
                &artifact.to_string_lossy(),
                "write patch artifact",
                &e.to_string(),
            )
        })?;

        Ok(artifact)
    }

    /// Removes artifacts older than `retention`. A missing directory or an
    /// unreadable entry is skipped silently.
    pub fn sweep(&self, retention: Duration) {
        let cutoff = SystemTime::now()
            .checked_sub(retention)
            .unwrap_or(UNIX_EPOCH);
        self.sweep_before(cutoff);
    }

    fn sweep_before(&self, cutoff: SystemTime) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };

        let mut removed = 0usize;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
                continue;
            };
            if modified < cutoff && fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            log::info!("🧹 Removed {} expired patch artifacts", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn record_writes_named_artifact_with_note() {
        let dir = TempDir::new().unwrap();
        let log = PatchLog::new(dir.path().join("fix_logs"));

        let artifact = log
            .record(
                "pkg/app.py",
                "--- app.py (before)\n+++ app.py (after)\n",
                "Hardcoded Secret Detected",
            )
            .unwrap();

        let name = artifact.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("_app.py.diff"), "unexpected name: {}", name);

        let body = fs::read_to_string(&artifact).unwrap();
        assert!(body.starts_with("--- app.py (before)\n"));
        assert!(body.ends_with("Note: Hardcoded Secret Detected\n"));
    }

    #[test]
    fn sweep_before_removes_only_expired_artifacts() {
        let dir = TempDir::new().unwrap();
        let log = PatchLog::new(dir.path().to_path_buf());
        let artifact = dir.path().join("2001-01-01_old.diff");
        fs::write(&artifact, "patch").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        // A cutoff in the future expires everything written so far.
        let future = SystemTime::now() + Duration::from_secs(3600);
        log.sweep_before(future);
        assert!(!artifact.exists());
        assert!(dir.path().join("nested").exists());

        let fresh = dir.path().join("fresh.diff");
        fs::write(&fresh, "patch").unwrap();
        let past = SystemTime::now() - Duration::from_secs(3600);
        log.sweep_before(past);
        assert!(fresh.exists());
    }

    #[test]
    fn sweep_tolerates_a_missing_directory() {
        let log = PatchLog::new(PathBuf::from("/nonexistent-patch-log-dir"));
        log.sweep(Duration::from_secs(60));
    }
}
