//! Error types for ShardScope
//!
//! Provides a unified error type for validation, coding and sweep operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ShardScope operations
pub type Result<T> = std::result::Result<T, ShardScopeError>;

/// Unified error type for ShardScope
#[derive(Error, Debug)]
pub enum ShardScopeError {
    // ===== Validation Errors =====
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ===== Erasure Coding Errors =====
    #[error("Unsupported configuration ({data_shards} data, {parity_shards} parity): {reason}")]
    UnsupportedConfiguration {
        data_shards: usize,
        parity_shards: usize,
        reason: String,
    },

    #[error("Erasure coding error: {0}")]
    ErasureCoding(String),

    #[error("Insufficient shards: have {available}, need {required}")]
    InsufficientShards { available: usize, required: usize },

    #[error("Shard layout mismatch: expected {expected}, got {actual}")]
    ShardSizeMismatch { expected: usize, actual: usize },

    #[error("Cannot encode an empty payload")]
    EmptyPayload,

    // ===== I/O Errors =====
    #[error("Failed to read payload {}: {source}", .path.display())]
    PayloadRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShardScopeError {
    /// Whether this error is the expected outcome of reconstructing from too
    /// few shards. The quorum prober treats it as a signal, not a failure.
    pub fn is_reconstruction_failure(&self) -> bool {
        matches!(
            self,
            ShardScopeError::InsufficientShards { .. } | ShardScopeError::ErasureCoding(_)
        )
    }
}

impl From<reed_solomon_erasure::Error> for ShardScopeError {
    fn from(err: reed_solomon_erasure::Error) -> Self {
        ShardScopeError::ErasureCoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShardScopeError::InsufficientShards {
            available: 2,
            required: 3,
        };
        assert_eq!(err.to_string(), "Insufficient shards: have 2, need 3");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShardScopeError = io_err.into();
        assert!(matches!(err, ShardScopeError::Io(_)));
    }

    #[test]
    fn test_payload_read_display() {
        let err = ShardScopeError::PayloadRead {
            path: PathBuf::from("missing.bin"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.bin"));
    }

    #[test]
    fn test_reconstruction_failure_classification() {
        let err = ShardScopeError::InsufficientShards {
            available: 1,
            required: 4,
        };
        assert!(err.is_reconstruction_failure());
        assert!(!ShardScopeError::EmptyPayload.is_reconstruction_failure());
        assert!(!ShardScopeError::InvalidConfiguration("odd".into()).is_reconstruction_failure());
    }
}
