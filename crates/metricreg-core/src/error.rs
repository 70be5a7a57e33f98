//! Shared error type across metricreg crates.

use thiserror::Error;

/// Stable error codes (used in logs and by callers matching on failure class).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Empty or malformed registry/metric name.
    InvalidName,
    /// Registry refused to create another counter.
    CapacityExceeded,
    /// Configuration could not be parsed or validated.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and test assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and registry.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::InvalidName(_) => ErrorCode::InvalidName,
            MetricsError::CapacityExceeded(_) => ErrorCode::CapacityExceeded,
            MetricsError::BadConfig(_) => ErrorCode::BadConfig,
            MetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Backend-class failures: the registry could not store a counter.
    pub fn is_backend(&self) -> bool {
        matches!(self, MetricsError::CapacityExceeded(_))
    }
}
