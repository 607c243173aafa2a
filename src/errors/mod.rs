use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VigilError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
        context: Option<String>,
    },

    // Model backend errors
    BackendError {
        backend: String,
        reason: String,
    },

    // Network/API errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },
}

impl VigilError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn backend_error(backend: &str, reason: &str) -> Self {
        Self::BackendError {
            backend: backend.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::BackendError { backend, reason } => {
                format!("Model backend '{}' error: {}\n💡 Check the backend configuration and model files", backend, reason)
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}", operation);
                if let Some(url) = url {
                    msg.push_str(&format!(" ({})", url));
                }
                if let Some(status) = status_code {
                    msg.push_str(&format!(" [HTTP {}]", status));
                }
                msg.push_str(&format!(": {}", reason));
                msg.push_str("\n💡 Check that the inference server is running and reachable");
                msg
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Invalid value '{}' for {}: {}", value, field, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
        }
    }
}

impl fmt::Display for VigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for VigilError {}

pub type VigilResult<T> = Result<T, VigilError>;

impl From<std::io::Error> for VigilError {
    fn from(error: std::io::Error) -> Self {
        Self::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for VigilError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<toml::de::Error> for VigilError {
    fn from(error: toml::de::Error) -> Self {
        Self::ParseError {
            content_type: "TOML configuration".to_string(),
            line_number: None,
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<reqwest::Error> for VigilError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_includes_suggestion() {
        let error = VigilError::validation_error(
            "chunk_overlap_lines",
            "400",
            "must be smaller than chunk_max_lines",
            Some("lower the overlap or raise the chunk size"),
        );
        let msg = error.user_message();
        assert!(msg.contains("chunk_overlap_lines"));
        assert!(msg.contains("💡 Suggestion"));
    }

    #[test]
    fn io_error_converts_to_system_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = VigilError::from(io);
        assert!(matches!(error, VigilError::SystemError { .. }));
    }

    #[test]
    fn json_error_carries_line_number() {
        let bad = serde_json::from_str::<serde_json::Value>("{\n  broken");
        let error = VigilError::from(bad.unwrap_err());
        match error {
            VigilError::ParseError { line_number, .. } => assert!(line_number.is_some()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
