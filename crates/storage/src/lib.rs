//! Chain storage for the basalt node.
//!
//! This crate owns the on-disk key schema, typed read/write accessors over a
//! byte-oriented key-value store, and the two one-time startup migrations:
//! splitting legacy combined block records into header/body/total-difficulty
//! entries, and building the cumulative per-block log-bloom index. Both
//! migrations are idempotent and safe to re-run after a crash; they assume
//! no concurrent writer during the migration window.

mod error;
pub use error::StorageError;

mod kv;
pub use kv::{KeyValueStore, MemoryStore, RocksStore};

pub mod keys;

mod models;
pub use models::LegacyBlockRecord;

pub mod accessors;

mod upgrade;
pub use upgrade::upgrade_block_storage;

mod bloom_index;
pub use bloom_index::build_bloom_index;
