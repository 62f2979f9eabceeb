//! On-disk key schema.
//!
//! Key layouts are consensus-external but upgrade-critical: the legacy
//! prefix below is what the storage migrator probes for, so none of these
//! constants may change without a corresponding migration.

use alloy_primitives::B256;

/// Head block hash of the canonical chain (raw 32 bytes).
pub const LAST_BLOCK_KEY: &[u8] = b"LastBlock";

/// Block-record schema version of the database (RLP `u64`).
pub const CHAIN_VERSION_KEY: &[u8] = b"BlockchainVersion";

/// Block-record schema version written by this build.
pub const CHAIN_VERSION: u64 = 3;

/// Bloom-index schema version marker (RLP `u64`).
pub const MIPMAP_VERSION_KEY: &[u8] = b"setting-mipmap-version";

/// Bloom-index schema version written by this build.
pub const MIPMAP_VERSION: u64 = 2;

/// Prefix of the legacy combined block record, keyed by block hash.
///
/// Exists only pre-migration; [`upgrade_block_storage`] deletes every key
/// under this prefix once the record is split.
///
/// [`upgrade_block_storage`]: crate::upgrade_block_storage
pub const LEGACY_BLOCK_PREFIX: &[u8] = b"block-hash-";

const HEADER_PREFIX: &[u8] = b"header-";
const BODY_PREFIX: &[u8] = b"body-";
const TD_PREFIX: &[u8] = b"block-td-";
const CANONICAL_PREFIX: &[u8] = b"block-num-";
const RECEIPTS_PREFIX: &[u8] = b"receipts-";
const BLOOM_BIN_PREFIX: &[u8] = b"mipmap-";

fn hash_key(prefix: &[u8], hash: B256) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 32);
    key.extend_from_slice(prefix);
    key.extend_from_slice(hash.as_slice());
    key
}

fn number_key(prefix: &[u8], number: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 8);
    key.extend_from_slice(prefix);
    key.extend_from_slice(&number.to_be_bytes());
    key
}

/// Key of the legacy combined record for `hash`.
pub fn legacy_block_key(hash: B256) -> Vec<u8> {
    hash_key(LEGACY_BLOCK_PREFIX, hash)
}

/// Key of the header record for `hash`.
pub fn header_key(hash: B256) -> Vec<u8> {
    hash_key(HEADER_PREFIX, hash)
}

/// Key of the body record for `hash`.
pub fn body_key(hash: B256) -> Vec<u8> {
    hash_key(BODY_PREFIX, hash)
}

/// Key of the total-difficulty record for `hash`.
pub fn td_key(hash: B256) -> Vec<u8> {
    hash_key(TD_PREFIX, hash)
}

/// Key mapping a block number to its canonical hash.
pub fn canonical_key(number: u64) -> Vec<u8> {
    number_key(CANONICAL_PREFIX, number)
}

/// Key of the receipts record for block `hash`.
pub fn receipts_key(hash: B256) -> Vec<u8> {
    hash_key(RECEIPTS_PREFIX, hash)
}

/// Key of the cumulative bloom bin for block `number`.
pub fn bloom_bin_key(number: u64) -> Vec<u8> {
    number_key(BLOOM_BIN_PREFIX, number)
}
