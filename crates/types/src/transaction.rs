//! Transaction type.

use alloy_primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A sender-signed message applied against the world state.
///
/// Signature recovery happens upstream; the recovered sender travels with
/// the transaction so the engine never touches key material.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Transaction {
    /// Sender account nonce at submission time.
    pub nonce: u64,
    /// Maximum gas the sender allows this transaction to consume.
    pub gas_limit: u64,
    /// Call target, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Value transferred to the target, in wei.
    pub value: U256,
    /// Call data or contract init code.
    pub input: Bytes,
    /// Recovered sender address.
    pub from: Address,
}

impl Transaction {
    /// Computes the transaction hash by encoding and hashing the transaction.
    pub fn hash_slow(&self) -> B256 {
        keccak256(alloy_rlp::encode(self))
    }

    /// Returns `true` if this transaction creates a contract.
    pub const fn creates_contract(&self) -> bool {
        self.to.is_create()
    }

    /// The address of the contract this transaction creates, if any.
    ///
    /// The address is derived deterministically from the sender and nonce,
    /// so replaying the transaction always yields the same address.
    pub fn contract_address(&self) -> Option<Address> {
        self.creates_contract().then(|| self.from.create(self.nonce))
    }
}
