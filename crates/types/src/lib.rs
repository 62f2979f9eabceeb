//! Consensus data model for the basalt chain.
//!
//! This crate defines the block, transaction and receipt types shared by the
//! state-transition engine and the chain storage layer. All types are
//! immutable once constructed and are identified by the keccak-256 hash of
//! their RLP encoding.

mod header;
pub use header::Header;

mod transaction;
pub use transaction::Transaction;

mod block;
pub use block::{Block, Body};

mod receipt;
pub use receipt::{receipts_bloom, Receipt};
