//! Cumulative per-block log-bloom index ("mipmap" bins).

use crate::{accessors, keys, KeyValueStore, StorageError};
use alloy_primitives::Bloom;
use basalt_types::receipts_bloom;
use tracing::info;

/// Builds the cumulative bloom index over the canonical chain, from genesis
/// through the current head.
///
/// Gated by the stored schema version: when it already matches
/// [`keys::MIPMAP_VERSION`] this returns without reading a single receipt.
/// Otherwise every block number in `0..=head` is walked in order; each bin
/// is the OR of the block's receipt blooms with all prior bins, enabling
/// cheap "might contain log X" range checks over history.
///
/// The build is not checkpointed: the version marker is only written after
/// the full walk succeeds, so any failure discards partial progress and the
/// next startup redoes the build from genesis. A missing canonical hash
/// inside the walked range is a broken chain invariant and fails the build
/// with [`StorageError::CorruptChain`].
pub fn build_bloom_index<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    if accessors::read_mipmap_version(store)? == Some(keys::MIPMAP_VERSION) {
        return Ok(());
    }

    // A clean database has nothing to index; just claim the version.
    let Some(head_hash) = accessors::read_head_block_hash(store)? else {
        return accessors::write_mipmap_version(store, keys::MIPMAP_VERSION);
    };
    let head = accessors::read_header(store, head_hash)?
        .ok_or(StorageError::MissingHeader(head_hash))?;

    info!(target: "storage", head = head.number, "building log bloom bins");

    let mut cumulative = Bloom::default();
    for number in 0..=head.number {
        let hash = accessors::read_canonical_hash(store, number)?
            .ok_or(StorageError::CorruptChain { number })?;
        let receipts = accessors::read_block_receipts(store, hash)?;
        cumulative |= receipts_bloom(&receipts);
        accessors::write_bloom_bin(store, number, cumulative)?;
    }

    accessors::write_mipmap_version(store, keys::MIPMAP_VERSION)?;
    info!(target: "storage", blocks = head.number + 1, "log bloom bins built");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use alloy_primitives::{Address, Bytes, Log, LogData, B256};
    use basalt_types::{Header, Receipt};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a store and counts reads of receipt records.
    #[derive(Debug)]
    struct ReceiptReadCounter<'a> {
        inner: &'a MemoryStore,
        receipt_reads: AtomicUsize,
    }

    impl<'a> ReceiptReadCounter<'a> {
        const fn new(inner: &'a MemoryStore) -> Self {
            Self { inner, receipt_reads: AtomicUsize::new(0) }
        }

        fn reads(&self) -> usize {
            self.receipt_reads.load(Ordering::SeqCst)
        }
    }

    impl KeyValueStore for ReceiptReadCounter<'_> {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
            if key.starts_with(b"receipts-") {
                self.receipt_reads.fetch_add(1, Ordering::SeqCst);
            }
            self.inner.get(key)
        }

        fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
            self.inner.put(key, value)
        }

        fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
            self.inner.delete(key)
        }

        fn prefix_iter(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
            self.inner.prefix_iter(prefix)
        }
    }

    fn log_with_topic(topic: B256) -> Log {
        Log {
            address: Address::repeat_byte(0x10),
            data: LogData::new_unchecked(vec![topic], Bytes::new()),
        }
    }

    /// Seeds a canonical chain where block `i` emits one log with topic
    /// byte `i`, and returns the per-block logs.
    fn seed_chain(store: &MemoryStore, len: u64) -> Vec<Log> {
        let mut parent_hash = B256::ZERO;
        let mut logs = Vec::new();
        for number in 0..len {
            let header = Header { number, parent_hash, ..Default::default() };
            let hash = header.hash_slow();
            parent_hash = hash;

            accessors::write_header(store, &header).expect("header");
            accessors::write_canonical_hash(store, number, hash).expect("canonical");

            let log = log_with_topic(B256::with_last_byte(number as u8 + 1));
            let receipt = Receipt::new(B256::ZERO, 21_000, B256::ZERO, 21_000, None, vec![log.clone()]);
            accessors::write_block_receipts(store, hash, &[receipt]).expect("receipts");
            logs.push(log);

            accessors::write_head_block_hash(store, hash).expect("head");
        }
        logs
    }

    #[test]
    fn clean_database_only_writes_the_version_marker() {
        let store = MemoryStore::new();
        build_bloom_index(&store).expect("build");
        assert_eq!(accessors::read_mipmap_version(&store).expect("version"), Some(2));
        assert_eq!(accessors::read_bloom_bin(&store, 0).expect("bin"), None);
    }

    #[test]
    fn bins_accumulate_prior_blocks() {
        let store = MemoryStore::new();
        let logs = seed_chain(&store, 3);

        build_bloom_index(&store).expect("build");

        // Bin 0 sees only block 0's log; bin 2 sees everything.
        let bin0 = accessors::read_bloom_bin(&store, 0).expect("bin").expect("present");
        assert!(bin0.contains_log(&logs[0]));
        assert!(!bin0.contains_log(&logs[2]));

        let bin2 = accessors::read_bloom_bin(&store, 2).expect("bin").expect("present");
        for log in &logs {
            assert!(bin2.contains_log(log));
        }
        assert_eq!(accessors::read_mipmap_version(&store).expect("version"), Some(2));
    }

    #[test]
    fn current_version_skips_receipt_reads_and_changes_nothing() {
        let store = MemoryStore::new();
        seed_chain(&store, 3);
        build_bloom_index(&store).expect("first build");

        let before = store.prefix_iter(b"").expect("dump");
        let counter = ReceiptReadCounter::new(&store);
        build_bloom_index(&counter).expect("second build");

        assert_eq!(counter.reads(), 0);
        assert_eq!(store.prefix_iter(b"").expect("dump"), before);
    }

    #[test]
    fn missing_canonical_hash_is_corruption() {
        let store = MemoryStore::new();
        seed_chain(&store, 3);
        store.delete(&keys::canonical_key(1)).expect("drop canonical entry");

        let err = build_bloom_index(&store).expect_err("hole in the chain");
        assert_eq!(err, StorageError::CorruptChain { number: 1 });
        // No version marker: the build reruns in full next startup.
        assert_eq!(accessors::read_mipmap_version(&store).expect("version"), None);
    }

    #[test]
    fn blocks_without_receipts_index_as_empty() {
        let store = MemoryStore::new();
        let header = Header::default();
        let hash = header.hash_slow();
        accessors::write_header(&store, &header).expect("header");
        accessors::write_canonical_hash(&store, 0, hash).expect("canonical");
        accessors::write_head_block_hash(&store, hash).expect("head");

        build_bloom_index(&store).expect("build");
        let bin = accessors::read_bloom_bin(&store, 0).expect("bin").expect("present");
        assert!(bin.is_zero());
    }

    #[test]
    fn stale_version_triggers_rebuild() {
        let store = MemoryStore::new();
        seed_chain(&store, 2);
        accessors::write_mipmap_version(&store, 1).expect("stale version");

        build_bloom_index(&store).expect("rebuild");
        assert_eq!(accessors::read_mipmap_version(&store).expect("version"), Some(2));
        assert!(accessors::read_bloom_bin(&store, 1).expect("bin").is_some());
    }
}
