//! # Errors
//!
//! Every failure a generation call can report. Any of them aborts the whole call:
//! no partial resource collection is ever returned next to an error.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of the module configuration a parse error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFragment {
    Developer,
    Platform,
}

impl fmt::Display for ConfigFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFragment::Developer => write!(f, "developer"),
            ConfigFragment::Platform => write!(f, "platform"),
        }
    }
}

/// Error type for module generation
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to parse {fragment} module config: {source}")]
    ConfigParse {
        fragment: ConfigFragment,
        source: serde_json::Error,
    },

    #[error("invalid module config: {field} {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error(
        "empty alicloud provider region: set the provider region or the {env} environment variable"
    )]
    MissingRegion { env: &'static str },

    #[error("invalid provider config '{provider_source}': {reason}")]
    InvalidProviderConfig {
        provider_source: String,
        reason: String,
    },

    #[error("cannot access manifest path {}: {source}", path.display())]
    PathAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing {}: {reason}", path.display())]
    DocumentDecode { path: PathBuf, reason: String },

    #[error(
        "no public connection exists for database '{database}' but privateRouting is disabled"
    )]
    MissingPublicConnection { database: String },

    #[error("resource '{resource}' references '{target}', which is not emitted before it")]
    DanglingReference { resource: String, target: String },

    #[error("generation cancelled")]
    Cancelled,

    #[error("failed to serialize {what}: {source}")]
    Serialization {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error(
        "panic in {module} module generator but recovered with error: [{message}] and stack {backtrace} and request {request}"
    )]
    InternalPanic {
        module: String,
        message: String,
        backtrace: String,
        request: String,
    },
}

impl GenerateError {
    /// Shorthand for a validation failure on one option
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is caused by the module configuration itself
    /// (fixable by editing developer or platform config)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GenerateError::ConfigParse { .. }
                | GenerateError::ConfigValidation { .. }
                | GenerateError::MissingRegion { .. }
                | GenerateError::MissingPublicConnection { .. }
        )
    }

    /// Get remediation guidance for this error
    pub fn remediation(&self) -> String {
        match self {
            GenerateError::ConfigParse { fragment, .. } => {
                format!("Fix the syntax or option types of the {fragment} module config")
            }
            GenerateError::ConfigValidation { field, .. } => {
                format!("Set a valid value for '{field}' in the developer or platform config")
            }
            GenerateError::MissingRegion { env } => {
                format!("Configure the provider region or export {env}")
            }
            GenerateError::InvalidProviderConfig { .. } => {
                "Use a provider source of the form 'namespace/name' or 'host/namespace/name' with a non-empty version".to_string()
            }
            GenerateError::PathAccess { path, .. } => {
                format!("Check that {} exists and is readable", path.display())
            }
            GenerateError::DocumentDecode { path, .. } => {
                format!(
                    "Fix the manifest in {} (every document needs apiVersion, kind and metadata.name)",
                    path.display()
                )
            }
            GenerateError::MissingPublicConnection { .. } => {
                "Enable privateRouting or add an unrestricted entry such as 0.0.0.0/0 to securityIPs".to_string()
            }
            GenerateError::Cancelled => "Retry the generation".to_string(),
            GenerateError::DanglingReference { .. }
            | GenerateError::Serialization { .. }
            | GenerateError::InternalPanic { .. } => {
                "Report this as a generator bug with the full error message".to_string()
            }
        }
    }
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
