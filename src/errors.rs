//! Error types for a single component analysis run.
//!
//! Every fatal condition aborts the current run only. The orchestrator
//! returns either a complete [`crate::core::AnalysisReport`] or one of these
//! errors; reports are never partially populated.
//!
//! # Error Codes
//!
//! Error codes are assigned by category:
//! - E001-E009: input and filesystem errors
//! - E010-E019: classification errors
//! - E020-E029: configuration errors
//! - E030-E039: instrumentation and harness errors

use crate::observability::AnalysisPhase;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Input file does not exist
    pub const NOT_FOUND: ErrorCode = ErrorCode("E001");
    /// Generic I/O failure
    pub const IO: ErrorCode = ErrorCode("E002");
    /// Classifier rejected the source
    pub const NOT_A_COMPONENT: ErrorCode = ErrorCode("E010");
    /// Invalid configuration value or file
    pub const CONFIG: ErrorCode = ErrorCode("E020");
    /// Instrumented artifact could not be persisted
    pub const INSTRUMENTATION: ErrorCode = ErrorCode("E030");
    /// Harness exceeded its wall-clock budget
    pub const HARNESS_TIMEOUT: ErrorCode = ErrorCode("E031");
    /// Harness runner failed
    pub const HARNESS: ErrorCode = ErrorCode("E032");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure of one analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input path does not reference an existing file
    #[error("Component file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The classifier rejected the source text
    #[error("File does not appear to be a React component: {}", path.display())]
    NotAComponent { path: PathBuf },

    /// The instrumented artifact could not be written
    #[error("Failed to persist instrumented component {}: {source}", path.display())]
    Instrumentation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The render harness did not finish within its budget
    #[error("Render harness timed out after {}ms", budget.as_millis())]
    HarnessTimeout { budget: Duration },

    /// The render harness runner failed
    #[error("Render harness failed: {message}")]
    Harness { message: String },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Other filesystem failures
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub fn harness(message: impl Into<String>) -> Self {
        Self::Harness {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_in(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NOT_FOUND,
            Self::NotAComponent { .. } => ErrorCode::NOT_A_COMPONENT,
            Self::Instrumentation { .. } => ErrorCode::INSTRUMENTATION,
            Self::HarnessTimeout { .. } => ErrorCode::HARNESS_TIMEOUT,
            Self::Harness { .. } => ErrorCode::HARNESS,
            Self::Config { .. } => ErrorCode::CONFIG,
            Self::Io { .. } => ErrorCode::IO,
        }
    }

    /// Pipeline stage the error belongs to.
    #[must_use]
    pub fn phase(&self) -> Option<AnalysisPhase> {
        match self {
            Self::NotFound { .. } | Self::NotAComponent { .. } => {
                Some(AnalysisPhase::Classification)
            }
            Self::Instrumentation { .. } => Some(AnalysisPhase::Instrumentation),
            Self::HarnessTimeout { .. } | Self::Harness { .. } => Some(AnalysisPhase::Harness),
            Self::Config { .. } | Self::Io { .. } => None,
        }
    }

    /// Whether the user can fix the problem by changing their input.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotAComponent { .. } | Self::Config { .. }
        )
    }
}

/// Result type alias for the analysis core
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct_per_category() {
        let not_found = AnalysisError::NotFound {
            path: "Missing.tsx".into(),
        };
        let rejected = AnalysisError::NotAComponent {
            path: "utils.ts".into(),
        };
        let timeout = AnalysisError::HarnessTimeout {
            budget: Duration::from_millis(10),
        };

        assert_eq!(not_found.code(), ErrorCode::NOT_FOUND);
        assert_eq!(rejected.code(), ErrorCode::NOT_A_COMPONENT);
        assert_eq!(timeout.code().as_str(), "E031");
    }

    #[test]
    fn test_messages_name_the_offending_path() {
        let err = AnalysisError::NotAComponent {
            path: "src/helpers.ts".into(),
        };
        assert_eq!(
            err.to_string(),
            "File does not appear to be a React component: src/helpers.ts"
        );
    }

    #[test]
    fn test_timeout_message_reports_budget() {
        let err = AnalysisError::HarnessTimeout {
            budget: Duration::from_millis(2500),
        };
        assert_eq!(err.to_string(), "Render harness timed out after 2500ms");
        assert_eq!(err.phase(), Some(AnalysisPhase::Harness));
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_user_fixable_classification() {
        assert!(AnalysisError::config("bad value").is_user_fixable());
        assert!(!AnalysisError::harness("runner crashed").is_user_fixable());
    }
}
