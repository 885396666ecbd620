//! Error types for capstore
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The set is deliberately closed: callers branch on the variant
//! (`NamespaceNotFound`, `KeyNotFound`, `Engine`, ...) instead of on
//! message text.

use std::io;
use thiserror::Error;

/// Result type alias for capstore operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Error types for the payload store
#[derive(Debug, Error)]
pub enum CacheError {
    /// The bucket the store is bound to does not exist
    #[error("Bucket {0:?} not found")]
    NamespaceNotFound(String),

    /// Key not found in the bucket
    #[error("Key {0:?} not found")]
    KeyNotFound(String),

    /// Storage engine failure (open, begin, table access, commit)
    #[error("Storage engine error: {0}")]
    Engine(#[from] redb::Error),

    /// Payload serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// Build a `KeyNotFound` from raw key bytes
    pub fn key_not_found(key: &[u8]) -> Self {
        CacheError::KeyNotFound(String::from_utf8_lossy(key).into_owned())
    }

    /// True for either of the two not-found conditions
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CacheError::NamespaceNotFound(_) | CacheError::KeyNotFound(_)
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e.to_string())
    }
}

macro_rules! engine_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CacheError {
                fn from(e: $ty) -> Self {
                    CacheError::Engine(e.into())
                }
            }
        )*
    };
}

engine_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_namespace_not_found() {
        let err = CacheError::NamespaceNotFound("rqbucket".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Bucket"));
        assert!(msg.contains("rqbucket"));
    }

    #[test]
    fn test_error_display_key_not_found() {
        let err = CacheError::key_not_found(b"missing-key");
        let msg = err.to_string();
        assert!(msg.contains("Key"));
        assert!(msg.contains("missing-key"));
    }

    #[test]
    fn test_key_not_found_lossy_utf8() {
        let err = CacheError::key_not_found(&[0x66, 0xFF, 0x6F]);
        match err {
            CacheError::KeyNotFound(k) => assert_eq!(k, "f\u{FFFD}o"),
            other => panic!("Wrong error variant: {other:?}"),
        }
    }

    #[test]
    fn test_is_not_found() {
        assert!(CacheError::NamespaceNotFound("b".into()).is_not_found());
        assert!(CacheError::KeyNotFound("k".into()).is_not_found());
        assert!(!CacheError::Config("bad".into()).is_not_found());
        assert!(!CacheError::Serialization("bad".into()).is_not_found());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: CacheError = io_err.into();
        assert!(matches!(err, CacheError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: std::result::Result<u32, _> = serde_json::from_slice(b"{not json");
        let err: CacheError = result.unwrap_err().into();
        assert!(matches!(err, CacheError::Serialization(_)));
    }

    #[test]
    fn test_error_from_redb_storage_error() {
        let err: CacheError = redb::StorageError::Corrupted("bad page".to_string()).into();
        assert!(matches!(err, CacheError::Engine(_)));
        assert!(err.to_string().contains("Storage engine error"));
    }
}
