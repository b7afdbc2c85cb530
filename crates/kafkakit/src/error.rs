//! Error types for Kafka reconciliation.
//!
//! Errors are categorized so callers can tell a bad catalog entry apart from
//! a cluster that refused a command or printed something we could not read.

use thiserror::Error;

/// Categories of errors, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// CLI output did not have the expected shape
    Parse,
    /// A desired-state descriptor was rejected before any call was made
    Validation,
    /// An external command failed
    Execution,
    /// A required tool could not be found
    ToolNotFound,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Parse => "Unexpected command output",
            Self::Validation => "Invalid resource declaration",
            Self::Execution => "Cluster command failed",
            Self::ToolNotFound => "Kafka tool not installed",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Parse => "Check that the installed Kafka tools match a supported version",
            Self::Validation => "Fix the resource declaration in the catalog",
            Self::Execution => "Check broker connectivity and client credentials",
            Self::ToolNotFound => "Install the Kafka CLI tools or set their paths in config.toml",
        }
    }
}

/// Errors that can occur while discovering or changing cluster state.
#[derive(Debug, Error)]
pub enum Error {
    /// Output from a listing command could not be parsed
    #[error("failed to parse {source_name} output: {message} (line: {line:?})")]
    Parse {
        /// Which listing produced the output
        source_name: &'static str,
        /// The offending line
        line: String,
        /// What was expected
        message: String,
    },

    /// A descriptor property is outside its allowed values
    #[error("invalid {resource}: {message}")]
    Validation {
        /// Resource the descriptor belongs to
        resource: String,
        /// Description of the violation
        message: String,
    },

    /// An external command exited unsuccessfully
    #[error("{message}: {stderr}")]
    CommandFailed {
        /// Which command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// A cluster-changing operation failed
    #[error("Failed to {action}. Received error: {source}")]
    Operation {
        /// Operation being attempted, e.g. "create ACL"
        action: &'static str,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Executable not found
    #[error("{0} not found in PATH")]
    ToolNotFound(String),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Parse { .. } => ErrorCategory::Parse,
            Error::Validation { .. } => ErrorCategory::Validation,
            Error::CommandFailed { .. } => ErrorCategory::Execution,
            Error::Operation { source, .. } => source.category(),
            Error::ToolNotFound(_) => ErrorCategory::ToolNotFound,
        }
    }

    pub(crate) fn validation(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub(crate) fn parse(source_name: &'static str, line: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            source_name,
            line: line.to_string(),
            message: message.into(),
        }
    }

    /// Wrap an error with the operation that was being attempted.
    pub(crate) fn during(action: &'static str) -> impl FnOnce(Error) -> Error {
        move |source| Error::Operation {
            action,
            source: Box::new(source),
        }
    }
}

/// Result type for Kafka operations.
pub type Result<T> = std::result::Result<T, Error>;
