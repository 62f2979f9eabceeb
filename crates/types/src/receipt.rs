//! Transaction receipt type.

use alloy_primitives::{Address, Bloom, Log, B256};
use alloy_rlp::{Decodable, Encodable, RlpDecodable, RlpEncodable};

/// The immutable record of one transaction's execution outcome.
///
/// A receipt captures the state root right after the transaction, the
/// cumulative gas consumed by the block up to and including it, the logs it
/// produced and a bloom filter over those logs only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// World-state root after this transaction was applied.
    pub post_state: B256,
    /// Gas consumed by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Hash of the transaction this receipt belongs to.
    pub tx_hash: B256,
    /// Gas consumed by this transaction alone.
    pub gas_used: u64,
    /// Address of the contract created by this transaction, if any.
    pub contract_address: Option<Address>,
    /// Logs emitted during execution, in emission order.
    pub logs: Vec<Log>,
    /// Bloom filter over this receipt's logs.
    pub bloom: Bloom,
}

impl Receipt {
    /// Creates a receipt, deriving the bloom filter from `logs`.
    pub fn new(
        post_state: B256,
        cumulative_gas_used: u64,
        tx_hash: B256,
        gas_used: u64,
        contract_address: Option<Address>,
        logs: Vec<Log>,
    ) -> Self {
        let mut bloom = Bloom::default();
        for log in &logs {
            bloom.accrue_log(log);
        }
        Self { post_state, cumulative_gas_used, tx_hash, gas_used, contract_address, logs, bloom }
    }
}

/// ORs together the blooms of a block's receipts.
pub fn receipts_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::default();
    for receipt in receipts {
        bloom |= receipt.bloom;
    }
    bloom
}

/// Storage encoding of a [`Receipt`].
///
/// `contract_address` is flattened to a plain address with the zero address
/// standing in for "none"; contracts can never live at the zero address.
#[derive(RlpEncodable, RlpDecodable)]
struct ReceiptRlp {
    post_state: B256,
    cumulative_gas_used: u64,
    bloom: Bloom,
    tx_hash: B256,
    contract_address: Address,
    gas_used: u64,
    logs: Vec<Log>,
}

impl Encodable for Receipt {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        ReceiptRlp {
            post_state: self.post_state,
            cumulative_gas_used: self.cumulative_gas_used,
            bloom: self.bloom,
            tx_hash: self.tx_hash,
            contract_address: self.contract_address.unwrap_or(Address::ZERO),
            gas_used: self.gas_used,
            logs: self.logs.clone(),
        }
        .encode(out);
    }
}

impl Decodable for Receipt {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let rlp = ReceiptRlp::decode(buf)?;
        Ok(Self {
            post_state: rlp.post_state,
            cumulative_gas_used: rlp.cumulative_gas_used,
            tx_hash: rlp.tx_hash,
            gas_used: rlp.gas_used,
            contract_address: (rlp.contract_address != Address::ZERO)
                .then_some(rlp.contract_address),
            logs: rlp.logs,
            bloom: rlp.bloom,
        })
    }
}
