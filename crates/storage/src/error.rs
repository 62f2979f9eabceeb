use alloy_primitives::B256;
use thiserror::Error;

/// Errors surfaced by the chain storage layer.
///
/// Every failure aborts the enclosing operation as a unit; the startup
/// migrations re-derive their state from canonical data, so any of these is
/// safe to retry after the underlying cause is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The underlying key-value store failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored record failed to decode.
    #[error("rlp decoding failed: {0}")]
    Rlp(#[from] alloy_rlp::Error),

    /// A canonical hash is missing for a block number within the chain.
    ///
    /// This is a broken chain invariant, not a recoverable condition; the
    /// node should halt rather than skip the block.
    #[error("chain db corrupted: no canonical hash for block {number}")]
    CorruptChain {
        /// Height with no canonical hash.
        number: u64,
    },

    /// A header referenced by the canonical chain is missing.
    #[error("chain db corrupted: header {0} missing")]
    MissingHeader(B256),

    /// The stored database version does not match this build.
    #[error("blockchain db version mismatch: stored {stored}, expected {expected}")]
    VersionMismatch {
        /// Version found in the store.
        stored: u64,
        /// Version this build writes.
        expected: u64,
    },
}
