//! RocksDB storage implementation.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{deserialize_value, serialize_key, serialize_value, Batch, Storage},
};
use async_trait::async_trait;
use rocksdb::{Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

/// RocksDB storage implementation
pub struct RocksDbStorage {
    db: Arc<DB>,
    /// Serializes guarded commits so check-then-write is atomic
    unique_write: Mutex<()>,
}

impl RocksDbStorage {
    /// Open RocksDB database at the specified path
    ///
    /// Creates all required column families if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, &path, all_column_families())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Opened RocksDB at {:?}", path.as_ref());

        Ok(Self {
            db: Arc::new(db),
            unique_write: Mutex::new(()),
        })
    }

    /// Open a database in a fresh temporary directory
    ///
    /// The directory is removed when the returned `TempDir` is dropped, so
    /// callers must keep it alive for as long as the storage is in use.
    pub fn open_test() -> Result<(Self, tempfile::TempDir)> {
        let temp_dir = tempfile::TempDir::new().map_err(StorageError::IoError)?;
        let storage = Self::open(temp_dir.path())?;
        Ok((storage, temp_dir))
    }

    fn cf_handle(&self, cf: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }

    fn contains_raw(&self, cf: &str, key_bytes: &[u8]) -> Result<bool> {
        let cf_handle = self.cf_handle(cf)?;
        let result = self
            .db
            .get_pinned_cf(cf_handle, key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(result.is_some())
    }
}

#[async_trait]
impl Storage for RocksDbStorage {
    async fn get<K, V>(&self, cf: &str, key: &K) -> Result<Option<V>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        let result = self
            .db
            .get_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match result {
            Some(bytes) => {
                let value = deserialize_value(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;

        self.db
            .put_cf(cf_handle, &key_bytes, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn exists<K>(&self, cf: &str, key: &K) -> Result<bool>
    where
        K: Serialize + Send + Sync,
    {
        let key_bytes = serialize_key(key)?;
        self.contains_raw(cf, &key_bytes)
    }

    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(Vec<u8>, V)>>
    where
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;

        let mut results = Vec::new();
        let iter = self.db.iterator_cf(cf_handle, rocksdb::IteratorMode::Start);

        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            let deserialized_value = deserialize_value(&value)?;
            results.push((key.to_vec(), deserialized_value));
        }

        Ok(results)
    }

    fn batch(&self) -> Box<dyn Batch> {
        Box::new(RocksDbBatch {
            db: Arc::clone(&self.db),
            write_batch: WriteBatch::default(),
        })
    }

    async fn commit_unless_exists<K>(
        &self,
        guard_cf: &str,
        guard_key: &K,
        batch: Box<dyn Batch>,
    ) -> Result<()>
    where
        K: Serialize + Send + Sync,
    {
        let key_bytes = serialize_key(guard_key)?;
        let _guard = self.unique_write.lock().await;

        if self.contains_raw(guard_cf, &key_bytes)? {
            batch.rollback();
            debug!(cf = guard_cf, "Guarded commit rejected, key already present");
            return Err(StorageError::AlreadyExists {
                cf: guard_cf.to_string(),
            });
        }

        batch.commit().await
    }
}

/// RocksDB batch implementation
pub struct RocksDbBatch {
    db: Arc<DB>,
    write_batch: WriteBatch,
}

#[async_trait]
impl Batch for RocksDbBatch {
    fn put_raw(&mut self, cf: &str, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;

        self.write_batch.put_cf(cf_handle, &key, &value);

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.db
            .write(self.write_batch)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Batch committed successfully");
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        debug!("Batch rolled back");
    }
}
