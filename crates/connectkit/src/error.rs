//! Error types for Kafka Connect operations.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for Connect operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of Connect errors, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The client config file is missing, unreadable or invalid.
    Configuration,
    /// The request never got an HTTP response.
    Network,
    /// The worker answered with a non-2xx status or an unreadable body.
    Protocol,
    /// A connector declaration was rejected before any request.
    Validation,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Configuration => "Invalid Connect client configuration",
            Self::Network => "Connect worker unreachable",
            Self::Protocol => "Connect worker rejected the request",
            Self::Validation => "Invalid connector declaration",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Configuration => "Check the endpoint and TLS files in the Connect client config",
            Self::Network => "Check that the Connect worker is running and reachable",
            Self::Protocol => "Check the connector config against the worker's response",
            Self::Validation => "Fix the connector declaration in the catalog",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to a Connect worker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client config file could not be used.
    #[error("invalid Connect client config {path}: {message}")]
    Config {
        /// Config file involved.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// IO error reading a local file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Transport failure or non-2xx response.
    #[error("{message}")]
    Http {
        /// Error message, including the response body when there is one.
        message: String,
        /// HTTP status code if a response was received.
        status: Option<u16>,
    },

    /// A response body was not the expected JSON.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// A connector declaration is invalid.
    #[error("invalid connector {name}: {message}")]
    Validation {
        /// Connector name.
        name: String,
        /// Description of the violation.
        message: String,
    },

    /// A connector operation failed.
    #[error("Failed to {action} connector config. Received error: {source}")]
    Operation {
        /// Operation being attempted, e.g. "create".
        action: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap an error with the connector operation being attempted.
    pub(crate) fn during(action: &'static str) -> impl FnOnce(Error) -> Error {
        move |source| Self::Operation {
            action,
            source: Box::new(source),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config { .. } | Error::Io { .. } => ErrorCategory::Configuration,
            Error::Http { status: None, .. } => ErrorCategory::Network,
            Error::Http { .. } | Error::InvalidResponse(_) => ErrorCategory::Protocol,
            Error::Validation { .. } => ErrorCategory::Validation,
            Error::Operation { source, .. } => source.category(),
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_message() {
        let err = Error::during("create")(Error::Http {
            message: "HTTP 409: connector exists".to_string(),
            status: Some(409),
        });
        assert_eq!(
            err.to_string(),
            "Failed to create connector config. Received error: HTTP 409: connector exists"
        );
        assert_eq!(err.category(), ErrorCategory::Protocol);
    }

    #[test]
    fn test_categories() {
        let refused = Error::Http {
            message: "connection refused".to_string(),
            status: None,
        };
        assert_eq!(refused.category(), ErrorCategory::Network);
        assert_eq!(
            Error::config("/etc/connect.yaml", "missing endpoint").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::InvalidResponse("eof".to_string()).category(),
            ErrorCategory::Protocol
        );
    }

    #[test]
    fn test_status_code_conversion() {
        let err: Error = ureq::Error::StatusCode(500).into();
        assert!(matches!(err, Error::Http { status: Some(500), .. }));
    }
}
