//! # pal-storage
//!
//! Storage abstraction layer for pal using RocksDB.
//!
//! Values are bincode-encoded and grouped into column families. Uniqueness
//! of natural keys is enforced here through [`Storage::commit_unless_exists`].

#![warn(clippy::all)]

pub mod column_families;
pub mod errors;
pub mod rocksdb_impl;
pub mod traits;

pub use column_families::*;
pub use errors::{Result, StorageError};
pub use rocksdb_impl::RocksDbStorage;
pub use traits::{Batch, BatchExt, Storage};
