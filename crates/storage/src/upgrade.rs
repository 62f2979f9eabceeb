//! One-time split of legacy combined block records.

use crate::{accessors, keys, KeyValueStore, LegacyBlockRecord, StorageError};
use alloy_primitives::B256;
use alloy_rlp::Decodable;
use tracing::info;

/// Splits every legacy combined block record into separate total-difficulty,
/// body and header entries.
///
/// Safe to invoke unconditionally at startup: when the head block is not
/// stored in the legacy format this returns immediately. The head record is
/// migrated last and its legacy key deleted last, so a crash anywhere
/// mid-migration leaves the head in legacy form and the next startup
/// re-detects and resumes; records split on a previous attempt are skipped
/// naturally because their legacy keys no longer exist.
pub fn upgrade_block_storage<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    // Current-format head means nothing legacy can remain.
    let Some(head) = accessors::read_head_block_hash(store)? else { return Ok(()) };
    let Some(head_record) = store.get(&keys::legacy_block_key(head))? else { return Ok(()) };

    info!(target: "storage", head = %head, "legacy block records detected, upgrading database");

    let mut migrated = 0u64;
    for (key, value) in store.prefix_iter(keys::LEGACY_BLOCK_PREFIX)? {
        // The head is migrated last to signal upgrade completion.
        if key.ends_with(head.as_slice()) {
            continue;
        }
        split_record(store, &value)?;
        store.delete(&key)?;
        migrated += 1;
    }

    let head_hash = split_record(store, &head_record)?;
    store.delete(&keys::legacy_block_key(head))?;

    info!(
        target: "storage",
        migrated = migrated + 1,
        head = %head_hash,
        "database upgrade complete"
    );
    Ok(())
}

/// Writes the three split records for one legacy record. Write order is
/// total difficulty, body, header: the header is the detection key for
/// other readers, so it lands only after the rest of the block is in place.
fn split_record<S: KeyValueStore + ?Sized>(
    store: &S,
    value: &[u8],
) -> Result<B256, StorageError> {
    let record = LegacyBlockRecord::decode(&mut &value[..])?;
    let hash = record.header.hash_slow();

    accessors::write_td(store, hash, record.td)?;
    accessors::write_body(store, hash, &record.body())?;
    accessors::write_header(store, &record.header)?;
    Ok(hash)
}
