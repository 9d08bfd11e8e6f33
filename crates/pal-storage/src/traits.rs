//! Storage trait definitions.

use crate::errors::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Storage interface for key-value operations
///
/// This trait abstracts the underlying storage implementation (RocksDB)
/// to enable testing with mock implementations.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get a value by key from a column family
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` if key exists, `Ok(None)` if not found
    async fn get<K, V>(&self, cf: &str, key: &K) -> Result<Option<V>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned;

    /// Put a key-value pair into a column family
    async fn put<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync;

    /// Check if a key exists in a column family
    async fn exists<K>(&self, cf: &str, key: &K) -> Result<bool>
    where
        K: Serialize + Send + Sync;

    /// Return every key-value pair in a column family
    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(Vec<u8>, V)>>
    where
        V: DeserializeOwned;

    /// Create a new batch for atomic operations
    fn batch(&self) -> Box<dyn Batch>;

    /// Commit `batch` only if `guard_key` is absent from `guard_cf`
    ///
    /// The existence check and the commit are atomic with respect to every
    /// other `commit_unless_exists` call on the same store. When the key is
    /// already present the batch is dropped and
    /// [`StorageError::AlreadyExists`](crate::StorageError::AlreadyExists)
    /// is returned. The batch is expected to write `guard_key` itself.
    async fn commit_unless_exists<K>(
        &self,
        guard_cf: &str,
        guard_key: &K,
        batch: Box<dyn Batch>,
    ) -> Result<()>
    where
        K: Serialize + Send + Sync;
}

/// Batch interface for atomic operations
///
/// Batches work with pre-serialized bytes to keep the trait object safe.
/// Use [`BatchExt`] for typed keys and values.
#[async_trait]
pub trait Batch: Send {
    /// Put a pre-serialized key-value pair in the batch
    fn put_raw(&mut self, cf: &str, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Commit the batch atomically
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the batch (drop without committing)
    fn rollback(self: Box<Self>);
}

/// Extension trait providing type-safe methods for Batch
pub trait BatchExt: Batch {
    /// Put a key-value pair in the batch (type-safe)
    fn put<K, V>(&mut self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize,
        V: Serialize,
    {
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;
        self.put_raw(cf, key_bytes, value_bytes)
    }
}

impl<T: Batch + ?Sized> BatchExt for T {}

pub(crate) fn serialize_key<K: Serialize>(key: &K) -> Result<Vec<u8>> {
    bincode::serialize(key).map_err(|e| crate::errors::StorageError::Serialization(e.to_string()))
}

pub(crate) fn serialize_value<V: Serialize>(value: &V) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| crate::errors::StorageError::Serialization(e.to_string()))
}

pub(crate) fn deserialize_value<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    bincode::deserialize(bytes)
        .map_err(|e| crate::errors::StorageError::Deserialization(e.to_string()))
}
