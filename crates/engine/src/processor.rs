//! Block processor: drives transaction application and reward settlement.

use crate::{
    accumulate_rewards, pay_rewards, GasPool, MessageExecutor, ProcessorError, StateDatabase,
};
use alloy_primitives::Log;
use basalt_types::{Block, Receipt};
use tracing::debug;

/// Everything a successful block-processing pass produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// One receipt per transaction, in transaction order.
    pub receipts: Vec<Receipt>,
    /// All logs emitted by the block, in emission order.
    pub logs: Vec<Log>,
    /// Total gas consumed by the block's transactions.
    pub gas_used: u64,
}

/// Applies whole blocks to the world state.
///
/// The processor orchestrates the gas pool and the message executor across
/// a block's transactions in strict list order, then settles mining rewards.
/// It assumes exclusive access to the state for the duration of one
/// [`process`](Self::process) call; callers serialize calls externally.
#[derive(Debug)]
pub struct StateProcessor<E> {
    executor: E,
}

impl<E: MessageExecutor> StateProcessor<E> {
    /// Creates a processor around the given message executor.
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Processes `block` against `state`.
    ///
    /// Transactions are applied in list order under a gas pool sized to the
    /// block's gas limit; each produces a receipt carrying the intermediate
    /// state root, the cumulative gas used so far, its logs and a bloom over
    /// those logs. After the last transaction the block and uncle rewards
    /// are computed and credited, uncles first, miner last.
    ///
    /// Any transaction failure, including gas-pool exhaustion, aborts the
    /// whole call: no receipts are returned for a partially-processed block
    /// and the error is surfaced to the caller untouched.
    pub fn process(
        &self,
        block: &Block,
        state: &mut dyn StateDatabase,
    ) -> Result<ProcessOutcome, ProcessorError> {
        let block_hash = block.hash();
        let mut gas_pool = GasPool::new(block.gas_limit());
        let mut receipts = Vec::with_capacity(block.transactions.len());
        let mut all_logs = Vec::new();
        let mut cumulative_gas = 0u64;

        for (index, tx) in block.transactions.iter().enumerate() {
            let tx_hash = tx.hash_slow();
            state.start_record(tx_hash, block_hash, index);

            let gas_used = self
                .executor
                .apply(state, &block.header, tx)
                .map_err(|source| ProcessorError::Execution { index, source })?;
            gas_pool.consume(gas_used)?;
            cumulative_gas += gas_used;

            let logs = state.logs(tx_hash);
            let receipt = Receipt::new(
                state.intermediate_root(),
                cumulative_gas,
                tx_hash,
                gas_used,
                tx.contract_address(),
                logs.clone(),
            );
            debug!(
                target: "engine",
                block = block.number(),
                index,
                tx = %tx_hash,
                gas_used,
                logs = logs.len(),
                "applied transaction"
            );

            receipts.push(receipt);
            all_logs.extend(logs);
        }

        let rewards = accumulate_rewards(&block.header, &block.uncles);
        pay_rewards(state, &block.header, &block.uncles, &rewards)?;

        Ok(ProcessOutcome { receipts, logs: all_logs, gas_used: cumulative_gas })
    }
}
