//! The capability interface of a payload store

use std::collections::BTreeSet;

use capstore_core::{Payload, Result};

/// Storage for captured request/response payloads, or any other
/// byte-keyed byte values.
///
/// Every method runs as one self-contained transaction against the
/// underlying engine. No multi-call transactions are exposed.
pub trait Cache: Send + Sync {
    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// Creates the bucket if it does not exist yet.
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Fetch the value stored under `key`.
    ///
    /// The returned buffer is an owned copy; nothing borrowed from the read
    /// transaction outlives the call.
    ///
    /// # Errors
    ///
    /// `NamespaceNotFound` if the bucket was never created or was deleted,
    /// `KeyNotFound` if the bucket exists but the key does not.
    fn get(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Decode every stored value, in ascending key order.
    ///
    /// Entries that fail to decode are logged and skipped. A missing bucket
    /// yields an empty list.
    fn get_all_requests(&self) -> Result<Vec<Payload>>;

    /// Number of entries in the bucket, 0 if it does not exist.
    fn records_count(&self) -> Result<u64>;

    /// Remove the bucket and everything in it.
    ///
    /// # Errors
    ///
    /// `NamespaceNotFound` if there is nothing to delete.
    fn delete_data(&self) -> Result<()>;

    /// All keys currently stored, byte for byte, empty if the bucket does
    /// not exist.
    fn get_all_keys(&self) -> Result<BTreeSet<Vec<u8>>>;

    /// Release the database handle.
    fn close_db(self)
    where
        Self: Sized;
}
