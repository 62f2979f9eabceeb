//! Capability boundaries consumed by the engine.

use crate::ExecutionError;
use alloy_primitives::{Address, Log, B256, I256};
use basalt_types::{Header, Transaction};

/// The world-state capability the engine mutates.
///
/// Implementations own the account trie; the engine only ever credits
/// balances, snapshots roots and attributes logs through this boundary.
/// Exclusive access for the duration of one block-processing call is the
/// caller's responsibility.
pub trait StateDatabase {
    /// Credits (or, for a negative `amount`, debits) an account balance.
    ///
    /// Reward arithmetic is signed because a sufficiently distant uncle
    /// yields a non-positive reward under the protocol formula.
    fn add_balance(&mut self, address: Address, amount: I256);

    /// Snapshots the state and returns the current state root.
    ///
    /// Called once per transaction to produce the post-transaction root
    /// embedded in its receipt.
    fn intermediate_root(&mut self) -> B256;

    /// Begins attributing emitted logs to the given transaction.
    ///
    /// `tx_hash`, `block_hash` and `index` key later log retrieval for
    /// receipts and bloom queries.
    fn start_record(&mut self, tx_hash: B256, block_hash: B256, index: usize);

    /// Logs recorded for the given transaction, in emission order.
    fn logs(&self, tx_hash: B256) -> Vec<Log>;
}

/// Executes one transaction's message against the world state.
///
/// The engine treats this as an opaque, deterministic function: identical
/// `(state, header, tx)` inputs must yield identical outputs. Emitted logs
/// are recorded through [`StateDatabase::start_record`]; the executor
/// returns only the gas the message consumed.
pub trait MessageExecutor {
    /// Applies `tx` and returns the gas it used.
    ///
    /// Any error is fatal to the enclosing block; the engine never retries
    /// or skips a failing transaction.
    fn apply(
        &self,
        state: &mut dyn StateDatabase,
        header: &Header,
        tx: &Transaction,
    ) -> Result<u64, ExecutionError>;
}
