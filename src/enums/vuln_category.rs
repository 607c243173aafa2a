use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;

/// The closed set of vulnerability classes the rule engine can report.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
pub enum VulnCategory {
    #[serde(rename = "sql_injection")]
    SqlInjection,
    #[serde(rename = "hardcoded_secrets")]
    HardcodedSecrets,
    #[serde(rename = "command_injection")]
    CommandInjection,
    #[serde(rename = "path_traversal")]
    PathTraversal,
    #[serde(rename = "weak_crypto")]
    WeakCrypto,
    #[serde(rename = "insecure_random")]
    InsecureRandom,
    #[serde(rename = "xss")]
    Xss,
    #[serde(rename = "buffer_overflow")]
    BufferOverflow,
    #[serde(rename = "insecure_deserialization")]
    InsecureDeserialization,
    #[serde(rename = "insufficient_logging")]
    InsufficientLogging,
    #[serde(rename = "ssrf")]
    Ssrf,
}

impl VulnCategory {
    /// Detection order; also the order issues appear in per chunk.
    pub const ALL: &'static [VulnCategory] = &[
        VulnCategory::SqlInjection,
        VulnCategory::HardcodedSecrets,
        VulnCategory::CommandInjection,
        VulnCategory::PathTraversal,
        VulnCategory::WeakCrypto,
        VulnCategory::InsecureRandom,
        VulnCategory::Xss,
        VulnCategory::BufferOverflow,
        VulnCategory::InsecureDeserialization,
        VulnCategory::InsufficientLogging,
        VulnCategory::Ssrf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VulnCategory::SqlInjection => "sql_injection",
            VulnCategory::HardcodedSecrets => "hardcoded_secrets",
            VulnCategory::CommandInjection => "command_injection",
            VulnCategory::PathTraversal => "path_traversal",
            VulnCategory::WeakCrypto => "weak_crypto",
            VulnCategory::InsecureRandom => "insecure_random",
            VulnCategory::Xss => "xss",
            VulnCategory::BufferOverflow => "buffer_overflow",
            VulnCategory::InsecureDeserialization => "insecure_deserialization",
            VulnCategory::InsufficientLogging => "insufficient_logging",
            VulnCategory::Ssrf => "ssrf",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            VulnCategory::SqlInjection => Severity::High,
            VulnCategory::HardcodedSecrets => Severity::Critical,
            VulnCategory::CommandInjection => Severity::Critical,
            VulnCategory::PathTraversal => Severity::High,
            VulnCategory::WeakCrypto => Severity::High,
            VulnCategory::InsecureRandom => Severity::Medium,
            VulnCategory::Xss => Severity::Medium,
            VulnCategory::BufferOverflow => Severity::Critical,
            VulnCategory::InsecureDeserialization => Severity::Critical,
            VulnCategory::InsufficientLogging => Severity::Low,
            VulnCategory::Ssrf => Severity::High,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            VulnCategory::SqlInjection => "SQL Injection Vulnerability",
            VulnCategory::HardcodedSecrets => "Hardcoded Secret Detected",
            VulnCategory::CommandInjection => "Command Injection Vulnerability",
            VulnCategory::PathTraversal => "Path Traversal Vulnerability",
            VulnCategory::WeakCrypto => "Weak Cryptographic Algorithm",
            VulnCategory::InsecureRandom => "Insecure Random Number Generation",
            VulnCategory::Xss => "Cross-Site Scripting (XSS) Vulnerability",
            VulnCategory::BufferOverflow => "Buffer Overflow Vulnerability",
            VulnCategory::InsecureDeserialization => "Insecure Deserialization",
            VulnCategory::InsufficientLogging => "Insufficient Logging",
            VulnCategory::Ssrf => "Server-Side Request Forgery (SSRF)",
        }
    }

    pub fn description(&self, line_content: &str) -> String {
        let lead = match self {
            VulnCategory::SqlInjection => "Direct SQL query construction with user input detected",
            VulnCategory::HardcodedSecrets => "Hardcoded secret found in code",
            VulnCategory::CommandInjection => "Command execution with user input detected",
            VulnCategory::PathTraversal => "Potential path traversal vulnerability",
            VulnCategory::WeakCrypto => "Weak cryptographic algorithm usage",
            VulnCategory::InsecureRandom => "Insecure random number generation",
            VulnCategory::Xss => "Potential XSS vulnerability",
            VulnCategory::BufferOverflow => "Buffer overflow vulnerability",
            VulnCategory::InsecureDeserialization => "Insecure deserialization of untrusted data",
            VulnCategory::InsufficientLogging => "Insufficient logging for security events",
            VulnCategory::Ssrf => "Server-side request forgery vulnerability",
        };
        format!("{}: {}", lead, line_content)
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            VulnCategory::SqlInjection => "Use parameterized queries or ORM to prevent SQL injection",
            VulnCategory::HardcodedSecrets => "Use environment variables or secure secret management",
            VulnCategory::CommandInjection => "Avoid command execution with user input, use safer alternatives",
            VulnCategory::PathTraversal => "Validate and sanitize file paths, use path.join()",
            VulnCategory::WeakCrypto => "Use strong cryptographic algorithms (SHA-256, AES-256)",
            VulnCategory::InsecureRandom => "Use cryptographically secure random generators (secrets module)",
            VulnCategory::Xss => "Sanitize user input and use proper output encoding",
            VulnCategory::BufferOverflow => "Use bounds checking and safe string functions",
            VulnCategory::InsecureDeserialization => "Avoid deserializing untrusted data, use JSON schema validation",
            VulnCategory::InsufficientLogging => "Implement comprehensive security event logging",
            VulnCategory::Ssrf => "Validate and restrict URLs, use allowlist approach",
        }
    }
}
