use std::fmt;
use serde::{Deserialize, Serialize};

/// Result of one fix application attempt. Rejections are enumerated
/// outcomes, not errors; nothing in the apply path aborts a session.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub enum FixOutcome {
    Applied { patch: String },
    Rejected { reason: RejectReason },
}

#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub enum RejectReason {
    NoFixProvided,
    InvalidFixStructure,
    InvalidFilePath,
    FileNotFound,
    PermissionDenied,
    SnippetNotFound,
    UnknownIssue,
    Io(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NoFixProvided => write!(f, "no fix provided"),
            RejectReason::InvalidFixStructure => write!(f, "invalid fix structure"),
            RejectReason::InvalidFilePath => write!(f, "invalid file path"),
            RejectReason::FileNotFound => write!(f, "file not found"),
            RejectReason::PermissionDenied => write!(f, "permission denied"),
            RejectReason::SnippetNotFound => write!(f, "before snippet not found in file"),
            RejectReason::UnknownIssue => write!(f, "unknown issue"),
            RejectReason::Io(message) => write!(f, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reasons_render_stable_messages() {
        assert_eq!(RejectReason::NoFixProvided.to_string(), "no fix provided");
        assert_eq!(RejectReason::SnippetNotFound.to_string(), "before snippet not found in file");
        assert_eq!(RejectReason::Io("disk full".to_string()).to_string(), "disk full");
    }
}
