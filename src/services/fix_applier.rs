use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::enums::fix_outcome::{FixOutcome, RejectReason};
use crate::structs::issue::Issue;

/// Applies before/after snippet fixes to files under the scan root.
///
/// Every failure maps to a reject reason instead of an error, so the caller
/// can report one fix and keep reviewing the rest. Checks run in a fixed
/// order and the first failing check wins; path validation in particular runs
/// before any filesystem access.
pub struct FixApplier {
    root: PathBuf,
}

impl FixApplier {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn apply(&self, issue: &Issue) -> FixOutcome {
        let (Some(fix), Some(file_path)) = (
            issue.fix.as_ref(),
            issue.file_path.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return FixOutcome::Rejected {
                reason: RejectReason::NoFixProvided,
            };
        };

        if !fix.is_actionable() {
            return FixOutcome::Rejected {
                reason: RejectReason::InvalidFixStructure,
            };
        }

        if !is_safe_relative_path(file_path) {
            return FixOutcome::Rejected {
                reason: RejectReason::InvalidFilePath,
            };
        }

        let target = self.root.join(file_path);
        if !target.exists() {
            return FixOutcome::Rejected {
                reason: RejectReason::FileNotFound,
            };
        }

        let content = match fs::read_to_string(&target) {
            Ok(content) => content,
            Err(error) => {
                return FixOutcome::Rejected {
                    reason: io_reason(&error),
                }
            }
        };

        if !content.contains(&fix.before) {
            return FixOutcome::Rejected {
                reason: RejectReason::SnippetNotFound,
            };
        }

        let patched = content.replacen(&fix.before, &fix.after, 1);
        if let Err(error) = fs::write(&target, patched) {
            return FixOutcome::Rejected {
                reason: io_reason(&error),
            };
        }

        FixOutcome::Applied {
            patch: render_patch(file_path, &fix.before, &fix.after),
        }
    }
}

/// Only plain relative paths may be touched. Anything that could escape the
/// scan root is rejected without looking at the filesystem.
fn is_safe_relative_path(path: &str) -> bool {
    !path.contains("..") && !path.starts_with('/') && !Path::new(path).is_absolute()
}

fn io_reason(error: &io::Error) -> RejectReason {
    if error.kind() == io::ErrorKind::PermissionDenied {
        RejectReason::PermissionDenied
    } else {
        RejectReason::Io(error.to_string())
    }
}

/// Diff-flavored summary of a fix, used for previews and the patch log.
/// The header names the file by base name, like the artifact files do.
pub fn render_patch(file_path: &str, before: &str, after: &str) -> String {
    let base = Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_path);
    let mut patch = String::new();
    patch.push_str(&format!("--- {} (before)\n", base));
    patch.push_str(&format!("+++ {} (after)\n", base));
    patch.push_str("@@\n");
    for line in before.lines() {
        patch.push_str(&format!("    {}\n", line));
    }
    patch.push_str("@@\n");
    for line in after.lines() {
        patch.push_str(&format!("    {}\n", line));
    }
    patch
}
