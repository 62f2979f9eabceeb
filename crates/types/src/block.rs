//! Block and block body types.

use crate::{Header, Transaction};
use alloy_primitives::B256;
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A full block: header plus the ordered transaction list and the headers of
/// any referenced uncle blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Block {
    /// The block header.
    pub header: Header,
    /// Transactions, in the order they must be applied.
    pub transactions: Vec<Transaction>,
    /// Headers of the uncle blocks referenced by this block.
    pub uncles: Vec<Header>,
}

impl Block {
    /// The block hash, i.e. the hash of the header.
    pub fn hash(&self) -> B256 {
        self.header.hash_slow()
    }

    /// The block height.
    pub const fn number(&self) -> u64 {
        self.header.number
    }

    /// The block gas limit.
    pub const fn gas_limit(&self) -> u64 {
        self.header.gas_limit
    }
}

/// The storage-side split of a block: everything except the header.
///
/// Bodies are persisted separately from headers so header-only sync and
/// reward validation never deserialize transaction data.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Body {
    /// Transactions, in application order.
    pub transactions: Vec<Transaction>,
    /// Uncle headers referenced by the block.
    pub uncles: Vec<Header>,
}

impl From<&Block> for Body {
    fn from(block: &Block) -> Self {
        Self { transactions: block.transactions.clone(), uncles: block.uncles.clone() }
    }
}
