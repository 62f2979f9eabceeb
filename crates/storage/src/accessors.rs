//! Typed read/write helpers over the raw key-value store.

use crate::{keys, KeyValueStore, StorageError};
use alloy_primitives::{Bloom, B256, U256};
use alloy_rlp::Decodable;
use basalt_types::{Body, Header, Receipt};

fn decode<T: Decodable>(bytes: &[u8]) -> Result<T, StorageError> {
    Ok(T::decode(&mut &bytes[..])?)
}

/// Reads the canonical head block hash, if one is set.
pub fn read_head_block_hash<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<B256>, StorageError> {
    let Some(bytes) = store.get(keys::LAST_BLOCK_KEY)? else { return Ok(None) };
    let hash = B256::try_from(bytes.as_slice())
        .map_err(|_| StorageError::Rlp(alloy_rlp::Error::UnexpectedLength))?;
    Ok(Some(hash))
}

/// Sets the canonical head block hash.
pub fn write_head_block_hash<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
) -> Result<(), StorageError> {
    store.put(keys::LAST_BLOCK_KEY, hash.as_slice())
}

/// Reads the header stored under `hash`.
pub fn read_header<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
) -> Result<Option<Header>, StorageError> {
    store.get(&keys::header_key(hash))?.map(|bytes| decode(&bytes)).transpose()
}

/// Persists a header under its own hash.
pub fn write_header<S: KeyValueStore + ?Sized>(
    store: &S,
    header: &Header,
) -> Result<(), StorageError> {
    store.put(&keys::header_key(header.hash_slow()), &alloy_rlp::encode(header))
}

/// Reads the body stored under block `hash`.
pub fn read_body<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
) -> Result<Option<Body>, StorageError> {
    store.get(&keys::body_key(hash))?.map(|bytes| decode(&bytes)).transpose()
}

/// Persists a block body under the block hash.
pub fn write_body<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
    body: &Body,
) -> Result<(), StorageError> {
    store.put(&keys::body_key(hash), &alloy_rlp::encode(body))
}

/// Reads the total difficulty stored under block `hash`.
pub fn read_td<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
) -> Result<Option<U256>, StorageError> {
    store.get(&keys::td_key(hash))?.map(|bytes| decode(&bytes)).transpose()
}

/// Persists a block's total difficulty under the block hash.
pub fn write_td<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
    td: U256,
) -> Result<(), StorageError> {
    store.put(&keys::td_key(hash), &alloy_rlp::encode(td))
}

/// Reads the canonical hash for block `number`, if any.
pub fn read_canonical_hash<S: KeyValueStore + ?Sized>(
    store: &S,
    number: u64,
) -> Result<Option<B256>, StorageError> {
    let Some(bytes) = store.get(&keys::canonical_key(number))? else { return Ok(None) };
    let hash = B256::try_from(bytes.as_slice())
        .map_err(|_| StorageError::Rlp(alloy_rlp::Error::UnexpectedLength))?;
    Ok(Some(hash))
}

/// Marks `hash` as the canonical block at `number`.
pub fn write_canonical_hash<S: KeyValueStore + ?Sized>(
    store: &S,
    number: u64,
    hash: B256,
) -> Result<(), StorageError> {
    store.put(&keys::canonical_key(number), hash.as_slice())
}

/// Reads the receipts of block `hash`; absent records decode as an empty
/// list, since receipts are only written for blocks that produced any.
pub fn read_block_receipts<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
) -> Result<Vec<Receipt>, StorageError> {
    match store.get(&keys::receipts_key(hash))? {
        Some(bytes) => decode(&bytes),
        None => Ok(Vec::new()),
    }
}

/// Persists the receipts of block `hash`.
pub fn write_block_receipts<S: KeyValueStore + ?Sized>(
    store: &S,
    hash: B256,
    receipts: &[Receipt],
) -> Result<(), StorageError> {
    let mut encoded = Vec::new();
    alloy_rlp::encode_list(receipts, &mut encoded);
    store.put(&keys::receipts_key(hash), &encoded)
}

/// Reads the cumulative bloom bin for block `number`.
pub fn read_bloom_bin<S: KeyValueStore + ?Sized>(
    store: &S,
    number: u64,
) -> Result<Option<Bloom>, StorageError> {
    let Some(bytes) = store.get(&keys::bloom_bin_key(number))? else { return Ok(None) };
    let bloom = Bloom::try_from(bytes.as_slice())
        .map_err(|_| StorageError::Rlp(alloy_rlp::Error::UnexpectedLength))?;
    Ok(Some(bloom))
}

/// Persists the cumulative bloom bin for block `number` (raw 256 bytes).
pub fn write_bloom_bin<S: KeyValueStore + ?Sized>(
    store: &S,
    number: u64,
    bloom: Bloom,
) -> Result<(), StorageError> {
    store.put(&keys::bloom_bin_key(number), bloom.as_slice())
}

fn read_version<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &[u8],
) -> Result<Option<u64>, StorageError> {
    store.get(key)?.map(|bytes| decode(&bytes)).transpose()
}

fn write_version<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &[u8],
    version: u64,
) -> Result<(), StorageError> {
    store.put(key, &alloy_rlp::encode(version))
}

/// Reads the bloom-index schema version marker.
pub fn read_mipmap_version<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<u64>, StorageError> {
    read_version(store, keys::MIPMAP_VERSION_KEY)
}

/// Persists the bloom-index schema version marker.
pub fn write_mipmap_version<S: KeyValueStore + ?Sized>(
    store: &S,
    version: u64,
) -> Result<(), StorageError> {
    write_version(store, keys::MIPMAP_VERSION_KEY, version)
}

/// Checks the block-record schema version of the database.
///
/// An unset version is claimed for `expected`; a different stored version
/// fails with [`StorageError::VersionMismatch`] so the operator can run the
/// upgrade tooling instead of silently mixing formats.
pub fn ensure_chain_version<S: KeyValueStore + ?Sized>(
    store: &S,
    expected: u64,
) -> Result<(), StorageError> {
    match read_version(store, keys::CHAIN_VERSION_KEY)? {
        Some(stored) if stored != expected => {
            Err(StorageError::VersionMismatch { stored, expected })
        }
        Some(_) => Ok(()),
        None => write_version(store, keys::CHAIN_VERSION_KEY, expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use alloy_primitives::Address;

    #[test]
    fn header_roundtrip_through_store() {
        let store = MemoryStore::new();
        let header = Header { number: 7, coinbase: Address::repeat_byte(0x01), ..Default::default() };
        write_header(&store, &header).expect("write");
        let read = read_header(&store, header.hash_slow()).expect("read");
        assert_eq!(read, Some(header));
    }

    #[test]
    fn td_roundtrip_through_store() {
        let store = MemoryStore::new();
        let hash = B256::repeat_byte(0x02);
        write_td(&store, hash, U256::from(99u64)).expect("write");
        assert_eq!(read_td(&store, hash).expect("read"), Some(U256::from(99u64)));
    }

    #[test]
    fn absent_receipts_read_as_empty() {
        let store = MemoryStore::new();
        let receipts = read_block_receipts(&store, B256::repeat_byte(0x03)).expect("read");
        assert!(receipts.is_empty());
    }

    #[test]
    fn receipts_roundtrip_through_store() {
        let store = MemoryStore::new();
        let hash = B256::repeat_byte(0x04);
        let receipts =
            vec![Receipt::new(B256::repeat_byte(0x05), 21_000, B256::ZERO, 21_000, None, vec![])];
        write_block_receipts(&store, hash, &receipts).expect("write");
        assert_eq!(read_block_receipts(&store, hash).expect("read"), receipts);
    }

    #[test]
    fn chain_version_claims_fresh_store() {
        let store = MemoryStore::new();
        ensure_chain_version(&store, 3).expect("fresh store");
        ensure_chain_version(&store, 3).expect("same version again");
    }

    #[test]
    fn chain_version_mismatch_is_fatal() {
        let store = MemoryStore::new();
        ensure_chain_version(&store, 2).expect("fresh store");
        let err = ensure_chain_version(&store, 3).expect_err("version moved");
        assert_eq!(err, StorageError::VersionMismatch { stored: 2, expected: 3 });
    }

    #[test]
    fn truncated_head_hash_is_a_decode_error() {
        let store = MemoryStore::new();
        store.put(crate::keys::LAST_BLOCK_KEY, b"short").expect("put");
        assert!(matches!(read_head_block_hash(&store), Err(StorageError::Rlp(_))));
    }
}
