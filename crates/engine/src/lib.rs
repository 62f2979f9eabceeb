//! Block state-transition engine for the basalt chain.
//!
//! This crate applies a block's transactions to the world state under the
//! block's gas budget, producing receipts and logs, and settles the mining
//! rewards for the block and its uncles. World-state access and message
//! execution are consumed through trait boundaries so the engine stays
//! deterministic and independently testable.

mod error;
pub use error::{ExecutionError, ProcessorError};

mod gas_pool;
pub use gas_pool::GasPool;

mod traits;
pub use traits::{MessageExecutor, StateDatabase};

mod rewards;
pub use rewards::{accumulate_rewards, pay_rewards, BLOCK_REWARD};

mod processor;
pub use processor::{ProcessOutcome, StateProcessor};
