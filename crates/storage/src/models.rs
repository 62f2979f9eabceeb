//! Storage encodings that have no in-memory counterpart.

use alloy_primitives::U256;
use alloy_rlp::{RlpDecodable, RlpEncodable};
use basalt_types::{Block, Body, Header, Transaction};

/// The pre-migration combined block record: header, body and accumulated
/// total difficulty in one RLP list under a [`LEGACY_BLOCK_PREFIX`] key.
///
/// Only the migrator decodes this format; new records are never written.
///
/// [`LEGACY_BLOCK_PREFIX`]: crate::keys::LEGACY_BLOCK_PREFIX
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct LegacyBlockRecord {
    /// The block header.
    pub header: Header,
    /// Transactions, in application order.
    pub transactions: Vec<Transaction>,
    /// Uncle headers referenced by the block.
    pub uncles: Vec<Header>,
    /// Total difficulty of the chain up to this block.
    pub td: U256,
}

impl LegacyBlockRecord {
    /// Assembles a legacy record from a block and its total difficulty.
    pub fn new(block: &Block, td: U256) -> Self {
        Self {
            header: block.header.clone(),
            transactions: block.transactions.clone(),
            uncles: block.uncles.clone(),
            td,
        }
    }

    /// The body half of the record.
    pub fn body(&self) -> Body {
        Body { transactions: self.transactions.clone(), uncles: self.uncles.clone() }
    }
}
