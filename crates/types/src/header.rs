//! Block header type.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// The subset of block metadata needed for validation, rewards and storage.
///
/// Headers are never mutated after construction; a header is identified by
/// the keccak-256 hash of its RLP encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Header {
    /// Hash of the parent block's header.
    pub parent_hash: B256,
    /// Beneficiary address credited with the mining reward.
    pub coinbase: Address,
    /// Root of the world state after this block.
    pub state_root: B256,
    /// Proof-of-work difficulty of this block.
    pub difficulty: U256,
    /// Height of this block in the chain.
    pub number: u64,
    /// Maximum gas the block's transactions may consume in total.
    pub gas_limit: u64,
    /// Gas actually consumed by the block's transactions.
    pub gas_used: u64,
    /// Unix timestamp claimed by the miner.
    pub timestamp: u64,
    /// Arbitrary miner-supplied extra data.
    pub extra_data: Bytes,
}

impl Header {
    /// Computes the header hash by encoding and hashing the header.
    pub fn hash_slow(&self) -> B256 {
        keccak256(alloy_rlp::encode(self))
    }
}
