//! RedbCache: payload store backed by one redb table
//!
//! ## Design
//!
//! RedbCache is a stateless facade over a shared `redb::Database`. It holds
//! nothing but an `Arc<Database>` and the name of the bucket (table) it is
//! bound to. Atomicity, isolation and durability all come from redb: each
//! method is exactly one read or write transaction.
//!
//! ## Bucket lifecycle
//!
//! The bucket is created by the first `set`. Reads distinguish a missing
//! bucket from a missing key; listing and counting treat a missing bucket
//! as empty. Deleting a missing bucket is an error.
//!
//! ## Buffer lifetime
//!
//! Values read from redb are `AccessGuard`s tied to the read transaction.
//! Every read path copies bytes out before the transaction ends.
//!
//! ## Thread Safety
//!
//! RedbCache is `Send + Sync` and cheap to clone; clones share one database.

use std::collections::BTreeSet;
use std::sync::Arc;

use capstore_core::{decode_payload, CacheError, Payload, Result};
use redb::{
    Database, ReadOnlyTable, ReadableTable, ReadableTableMetadata, TableDefinition, TableError,
};
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::config::REQUESTS_BUCKET_NAME;

type BucketDefinition<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

/// Payload store over a single bucket of a redb database
///
/// # Example
///
/// ```ignore
/// use capstore_storage::{get_db, Cache, RedbCache};
/// use std::sync::Arc;
///
/// let db = Arc::new(get_db("requests.db"));
/// let cache = RedbCache::with_default_bucket(db);
///
/// cache.set(b"key", b"value")?;
/// assert_eq!(cache.get(b"key")?, b"value");
/// cache.close_db();
/// ```
#[derive(Clone)]
pub struct RedbCache {
    db: Arc<Database>,
    bucket: String,
}

impl RedbCache {
    /// Bind a store to `bucket` inside an already open database
    pub fn new(db: Arc<Database>, bucket: impl Into<String>) -> Self {
        Self {
            db,
            bucket: bucket.into(),
        }
    }

    /// Bind a store to the default requests bucket
    pub fn with_default_bucket(db: Arc<Database>) -> Self {
        Self::new(db, REQUESTS_BUCKET_NAME)
    }

    /// Name of the bucket this store reads and writes
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn definition(&self) -> BucketDefinition<'_> {
        TableDefinition::new(&self.bucket)
    }

    /// Open the bucket for reading, `None` if it does not exist
    fn open_bucket(
        &self,
        txn: &redb::ReadTransaction,
    ) -> Result<Option<ReadOnlyTable<&'static [u8], &'static [u8]>>> {
        match txn.open_table(self.definition()) {
            Ok(table) => Ok(Some(table)),
            Err(TableError::TableDoesNotExist(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the named bucket and all its contents
    ///
    /// Any bucket of the same database may be named, not only the one this
    /// store is bound to.
    ///
    /// # Errors
    ///
    /// `NamespaceNotFound` if no bucket with that name exists. Failures are
    /// logged before being returned.
    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        let result = self.try_delete_bucket(name);
        if let Err(e) = &result {
            warn!(
                target: "capstore::cache",
                error = %e,
                bucket = name,
                "Failed to delete bucket"
            );
        }
        result
    }

    fn try_delete_bucket(&self, name: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        let existed = txn.delete_table(BucketDefinition::new(name))?;
        if !existed {
            txn.abort()?;
            return Err(CacheError::NamespaceNotFound(name.to_string()));
        }
        txn.commit()?;
        debug!(target: "capstore::cache", bucket = name, "Deleted bucket");
        Ok(())
    }
}

impl Cache for RedbCache {
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(self.definition())?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        debug!(
            target: "capstore::cache",
            bucket = %self.bucket,
            key = %String::from_utf8_lossy(key),
            len = value.len(),
            "Stored value"
        );
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let txn = self.db.begin_read()?;
        let table = self
            .open_bucket(&txn)?
            .ok_or_else(|| CacheError::NamespaceNotFound(self.bucket.clone()))?;

        // Copy out while the guard is still valid
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        value.ok_or_else(|| CacheError::key_not_found(key))
    }

    fn get_all_requests(&self) -> Result<Vec<Payload>> {
        let txn = self.db.begin_read()?;
        let Some(table) = self.open_bucket(&txn)? else {
            return Ok(Vec::new());
        };

        let mut payloads = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            match decode_payload(value.value()) {
                Ok(payload) => payloads.push(payload),
                Err(e) => {
                    warn!(
                        target: "capstore::cache",
                        error = %e,
                        key = %String::from_utf8_lossy(key.value()),
                        len = value.value().len(),
                        "Failed to deserialize bytes to payload"
                    );
                }
            }
        }
        Ok(payloads)
    }

    fn records_count(&self) -> Result<u64> {
        let txn = self.db.begin_read()?;
        match self.open_bucket(&txn)? {
            Some(table) => Ok(table.len()?),
            None => Ok(0),
        }
    }

    fn delete_data(&self) -> Result<()> {
        self.delete_bucket(&self.bucket)
    }

    fn get_all_keys(&self) -> Result<BTreeSet<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let mut keys = BTreeSet::new();
        let Some(table) = self.open_bucket(&txn)? else {
            return Ok(keys);
        };

        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.insert(key.value().to_vec());
        }
        Ok(keys)
    }

    /// Drops this handle's reference to the database.
    ///
    /// The file is closed once the last clone sharing the `Arc` is gone.
    fn close_db(self) {
        debug!(target: "capstore::cache", bucket = %self.bucket, "Closing database");
        drop(self.db);
    }
}
