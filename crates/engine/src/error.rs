use thiserror::Error;

/// Errors surfaced by a message executor.
///
/// Any of these aborts processing of the enclosing block as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The sender cannot cover the transaction's upfront gas cost.
    #[error("insufficient funds for gas: account {account}")]
    InsufficientFunds {
        /// Hex-encoded sender address.
        account: String,
    },

    /// The transaction's own gas limit is below its intrinsic cost.
    #[error("intrinsic gas too low: have {have}, want {want}")]
    IntrinsicGas {
        /// Gas limit carried by the transaction.
        have: u64,
        /// Minimum gas the message requires.
        want: u64,
    },

    /// The virtual machine rejected the message.
    #[error("vm error: {0}")]
    Vm(String),
}

/// Errors returned by block processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    /// The block's gas pool was exhausted mid-block.
    #[error("gas pool exhausted: requested {requested}, {available} remaining")]
    OutOfGas {
        /// Gas the failing transaction consumed.
        requested: u64,
        /// Gas left in the pool when it failed.
        available: u64,
    },

    /// A transaction failed to execute; the whole block is rejected.
    #[error("transaction {index} failed: {source}")]
    Execution {
        /// Index of the failing transaction within the block.
        index: usize,
        /// The executor's error.
        #[source]
        source: ExecutionError,
    },

    /// The reward list does not line up with the block's beneficiaries.
    #[error("reward count mismatch: {rewards} rewards for {beneficiaries} beneficiaries")]
    RewardCountMismatch {
        /// Computed reward entries.
        rewards: usize,
        /// Uncle coinbases plus the block coinbase.
        beneficiaries: usize,
    },
}
