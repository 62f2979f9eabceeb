//! Per-block gas accounting.

use crate::ProcessorError;

/// Tracks the gas remaining for one block-processing pass.
///
/// A pool is created with the block's gas limit and only ever debited;
/// exactly one instance lives for the duration of one [`process`] call.
///
/// [`process`]: crate::StateProcessor::process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPool(u64);

impl GasPool {
    /// Creates a pool holding `limit` gas.
    pub const fn new(limit: u64) -> Self {
        Self(limit)
    }

    /// Debits `amount` gas from the pool.
    ///
    /// Returns the remaining balance, or [`ProcessorError::OutOfGas`] if the
    /// pool holds less than `amount`. A failed consume leaves the pool
    /// untouched.
    pub fn consume(&mut self, amount: u64) -> Result<u64, ProcessorError> {
        if amount > self.0 {
            return Err(ProcessorError::OutOfGas { requested: amount, available: self.0 });
        }
        self.0 -= amount;
        Ok(self.0)
    }

    /// Gas left in the pool.
    pub const fn remaining(&self) -> u64 {
        self.0
    }
}
