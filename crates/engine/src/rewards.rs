//! Block and uncle mining rewards.
//!
//! Reward computation and reward application are deliberately two separate
//! operations: the full reward list for a block is computed before any
//! balance is touched, so the arithmetic can be audited and tested without
//! mutating state, and application order stays deterministic.

use crate::{ProcessorError, StateDatabase};
use alloy_primitives::{I256, U256};
use basalt_types::Header;

/// Static reward credited to a block's miner, in wei (5 ether).
pub const BLOCK_REWARD: U256 = U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]);

const BLOCK_REWARD_SIGNED: I256 = I256::from_raw(BLOCK_REWARD);

const fn signed(n: u64) -> I256 {
    I256::from_raw(U256::from_limbs([n, 0, 0, 0]))
}

/// Computes the reward list for a block: one entry per uncle, in uncle
/// order, followed by exactly one entry for the miner.
///
/// An uncle at height `u` referenced by a block at height `h` earns
/// `(u + 8 - h) * R / 8`, which is non-positive for a sufficiently distant
/// uncle and is not clamped. The miner earns the static reward plus `R / 32`
/// for every uncle referenced. All divisions truncate toward zero; the
/// rounding direction is consensus-significant and must not be changed.
///
/// Pure computation; applying the result is [`pay_rewards`]'s job.
pub fn accumulate_rewards(header: &Header, uncles: &[Header]) -> Vec<I256> {
    accumulate_rewards_with(BLOCK_REWARD_SIGNED, header, uncles)
}

fn accumulate_rewards_with(block_reward: I256, header: &Header, uncles: &[Header]) -> Vec<I256> {
    let eight = signed(8);
    let thirty_two = signed(32);

    let mut rewards = Vec::with_capacity(uncles.len() + 1);
    let mut miner_reward = block_reward;
    for uncle in uncles {
        let r = (signed(uncle.number) + eight - signed(header.number)) * block_reward / eight;
        rewards.push(r);

        miner_reward += block_reward / thirty_two;
    }
    rewards.push(miner_reward);
    rewards
}

/// Credits the computed rewards to their beneficiaries.
///
/// Uncle coinbases are credited first, in uncle order, then the block's own
/// coinbase with the final entry. The order mirrors [`accumulate_rewards`]
/// exactly and must be preserved: it is what makes partial application
/// recoverable by deterministic replay when no surrounding atomicity is
/// guaranteed.
pub fn pay_rewards(
    state: &mut dyn StateDatabase,
    header: &Header,
    uncles: &[Header],
    rewards: &[I256],
) -> Result<(), ProcessorError> {
    if rewards.len() != uncles.len() + 1 {
        return Err(ProcessorError::RewardCountMismatch {
            rewards: rewards.len(),
            beneficiaries: uncles.len() + 1,
        });
    }
    for (uncle, reward) in uncles.iter().zip(rewards) {
        state.add_balance(uncle.coinbase, *reward);
    }
    state.add_balance(header.coinbase, rewards[uncles.len()]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Log, B256};
    use std::collections::BTreeMap;

    fn header_at(number: u64, coinbase: Address) -> Header {
        Header { number, coinbase, ..Default::default() }
    }

    #[derive(Debug, Default)]
    struct BalanceLedger {
        balances: BTreeMap<Address, I256>,
        credits: Vec<Address>,
    }

    impl StateDatabase for BalanceLedger {
        fn add_balance(&mut self, address: Address, amount: I256) {
            *self.balances.entry(address).or_default() += amount;
            self.credits.push(address);
        }

        fn intermediate_root(&mut self) -> B256 {
            B256::ZERO
        }

        fn start_record(&mut self, _tx_hash: B256, _block_hash: B256, _index: usize) {}

        fn logs(&self, _tx_hash: B256) -> Vec<Log> {
            Vec::new()
        }
    }

    #[test]
    fn no_uncles_yields_single_static_reward() {
        let header = header_at(10, Address::repeat_byte(0x01));
        let rewards = accumulate_rewards_with(signed(5), &header, &[]);
        assert_eq!(rewards, vec![signed(5)]);
    }

    #[test]
    fn one_uncle_reference_vector() {
        // header at 10, uncle at 9, R = 5:
        //   uncle reward = (9 + 8 - 10) * 5 / 8 = 35 / 8 = 4 (truncated)
        //   miner reward = 5 + 5 / 32 = 5
        let header = header_at(10, Address::repeat_byte(0x01));
        let uncles = vec![header_at(9, Address::repeat_byte(0x02))];
        let rewards = accumulate_rewards_with(signed(5), &header, &uncles);
        assert_eq!(rewards, vec![signed(4), signed(5)]);
    }

    #[test]
    fn distant_uncle_reward_truncates_toward_zero() {
        // uncle at 1, header at 10: (1 + 8 - 10) * 5 / 8 = -5 / 8 = 0, not -1.
        let header = header_at(10, Address::repeat_byte(0x01));
        let uncles = vec![header_at(1, Address::repeat_byte(0x02))];
        let rewards = accumulate_rewards_with(signed(5), &header, &uncles);
        assert_eq!(rewards[0], I256::ZERO);
    }

    #[test]
    fn very_distant_uncle_reward_is_negative() {
        // uncle at 1, header at 20: (1 + 8 - 20) * 8 / 8 = -11.
        let header = header_at(20, Address::repeat_byte(0x01));
        let uncles = vec![header_at(1, Address::repeat_byte(0x02))];
        let rewards = accumulate_rewards_with(signed(8), &header, &uncles);
        assert_eq!(rewards[0], -signed(11));
    }

    #[test]
    fn per_uncle_rewards_do_not_alias() {
        // Two uncles at different depths must get distinct entries.
        let header = header_at(10, Address::repeat_byte(0x01));
        let uncles =
            vec![header_at(9, Address::repeat_byte(0x02)), header_at(8, Address::repeat_byte(0x03))];
        let rewards = accumulate_rewards_with(signed(16), &header, &uncles);
        // (9+8-10)*16/8 = 14, (8+8-10)*16/8 = 12, miner = 16 + 2*(16/32) = 17
        assert_eq!(rewards, vec![signed(14), signed(12), signed(17)]);
    }

    #[test]
    fn full_block_reward_for_production_constant() {
        let header = header_at(10, Address::repeat_byte(0x01));
        let uncles = vec![header_at(9, Address::repeat_byte(0x02))];
        let rewards = accumulate_rewards(&header, &uncles);

        // (9 + 8 - 10) * 5e18 / 8 and 5e18 + 5e18/32, both exact.
        assert_eq!(rewards[0], signed(4_375_000_000_000_000_000));
        assert_eq!(rewards[1], signed(5_156_250_000_000_000_000));
    }

    #[test]
    fn pay_rewards_credits_uncles_first_then_miner() {
        let miner = Address::repeat_byte(0x01);
        let uncle_miner = Address::repeat_byte(0x02);
        let header = header_at(10, miner);
        let uncles = vec![header_at(9, uncle_miner)];

        let rewards = vec![signed(4), signed(5)];
        let mut ledger = BalanceLedger::default();
        pay_rewards(&mut ledger, &header, &uncles, &rewards).expect("counts line up");

        assert_eq!(ledger.credits, vec![uncle_miner, miner]);
        assert_eq!(ledger.balances[&uncle_miner], signed(4));
        assert_eq!(ledger.balances[&miner], signed(5));
        assert_eq!(ledger.balances.len(), 2);
    }

    #[test]
    fn pay_rewards_rejects_mismatched_list() {
        let header = header_at(10, Address::repeat_byte(0x01));
        let mut ledger = BalanceLedger::default();
        let err = pay_rewards(&mut ledger, &header, &[], &[]).expect_err("empty reward list");
        assert!(matches!(err, ProcessorError::RewardCountMismatch { .. }));
        assert!(ledger.balances.is_empty());
    }
}
