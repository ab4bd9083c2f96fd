//! Cache error types.

use std::path::PathBuf;

use gamedata_format::SchemaFingerprint;
use thiserror::Error;

/// Cache operation error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// File I/O error.
    #[error("failed to {operation} cache file: {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a cache file, or a truncated one.
    #[error("invalid cache file format: {reason}")]
    InvalidFormat { reason: String },

    /// Written by a newer format version.
    #[error("cache format version {found} is not supported (maximum: {max_supported})")]
    UnsupportedFormatVersion { found: u32, max_supported: u32 },

    /// Written for a different schema layout.
    #[error("cache was built for schema {found}, expected {expected}")]
    FingerprintMismatch {
        expected: SchemaFingerprint,
        found: SchemaFingerprint,
    },

    /// Serialization error.
    #[error("failed to serialize decoded tree")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("failed to deserialize decoded tree")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("failed to move {} into place at {}", temp_path.display(), target_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Whether this error means the cache file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = CacheError::io(
            "read",
            "/nowhere/gamedata.cache",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "failed to read cache file: /nowhere/gamedata.cache");

        let err = CacheError::invalid_format("file too small");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_fingerprint_mismatch_display() {
        let err = CacheError::FingerprintMismatch {
            expected: SchemaFingerprint::from_bytes([0x11; 32]),
            found: SchemaFingerprint::from_bytes([0x22; 32]),
        };
        let message = err.to_string();
        assert!(message.starts_with("cache was built for schema 2222"));
        assert!(message.contains("expected 1111"));
    }
}
