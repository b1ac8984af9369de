//! Reward allocation and pool decay.
//!
//! Each recorded trade claims `remaining / divisor` of the pool (integer
//! division, truncating), so the pool decays geometrically:
//!
//! - trade 1 claims `R / d`
//! - trade 2 claims `(R - R/d) / d`
//! - …
//!
//! The pool never goes negative and never grows through allocation. Once
//! `remaining < divisor` every further allocation is 0.

use crate::error::{InvalidArgument, RewardsError};
use crate::types::Amount;

/// Result of allocating one trade's reward from the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// Amount credited to the trader.
    pub amount: Amount,
    /// Pool size after the allocation.
    pub new_remaining: Amount,
}

/// Compute the allocation for one trade.
///
/// `amount = remaining / divisor`, `new_remaining = remaining - amount`.
/// A zero `divisor` is rejected; a zero `remaining` yields a zero allocation.
pub fn allocate(remaining: Amount, divisor: Amount) -> Result<Allocation, RewardsError> {
    let amount = remaining
        .checked_div(divisor)
        .ok_or(InvalidArgument::DivisorOutOfRange)?;
    let new_remaining = remaining
        .checked_sub(amount)
        .ok_or(RewardsError::ArithmeticOverflow)?;
    Ok(Allocation { amount, new_remaining })
}

/// Preallocation cap for [`project`]; `trades` is caller-controlled.
const PROJECT_PREALLOC: usize = 1024;

/// Allocation schedule for the next `trades` recordings starting from `remaining`.
///
/// Ends early once the pool can no longer yield a non-zero allocation, so the
/// schedule never holds more than one zero entry.
pub fn project(
    remaining: Amount,
    divisor: Amount,
    trades: usize,
) -> Result<Vec<Allocation>, RewardsError> {
    let mut schedule = Vec::with_capacity(trades.min(PROJECT_PREALLOC));
    let mut pool = remaining;
    for _ in 0..trades {
        let a = allocate(pool, divisor)?;
        pool = a.new_remaining;
        schedule.push(a);
        if a.amount == 0 {
            break;
        }
    }
    Ok(schedule)
}

/// Pool size after `trades` further recordings.
///
/// Stops early once the pool can no longer yield a non-zero allocation.
pub fn remaining_after(
    remaining: Amount,
    divisor: Amount,
    trades: u64,
) -> Result<Amount, RewardsError> {
    let mut pool = remaining;
    for _ in 0..trades {
        let a = allocate(pool, divisor)?;
        if a.amount == 0 {
            break;
        }
        pool = a.new_remaining;
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING, TOKEN};

    // ------------------------------------------------------------------
    // allocate
    // ------------------------------------------------------------------

    #[test]
    fn first_trade_of_reference_pool() {
        let a = allocate(DEFAULT_INITIAL_REMAINING, DEFAULT_DIVISOR).unwrap();
        assert_eq!(a.amount, 2 * TOKEN);
        assert_eq!(a.new_remaining, 9_999_998_000_000_000_000_000_000);
    }

    #[test]
    fn truncates_toward_zero() {
        let a = allocate(1_999, 1_000).unwrap();
        assert_eq!(a.amount, 1);
        assert_eq!(a.new_remaining, 1_998);
    }

    #[test]
    fn empty_pool_allocates_nothing() {
        let a = allocate(0, 10).unwrap();
        assert_eq!(a, Allocation { amount: 0, new_remaining: 0 });
    }

    #[test]
    fn pool_smaller_than_divisor_allocates_nothing() {
        let a = allocate(9, 10).unwrap();
        assert_eq!(a, Allocation { amount: 0, new_remaining: 9 });
    }

    #[test]
    fn divisor_one_drains_pool() {
        let a = allocate(1_000, 1).unwrap();
        assert_eq!(a, Allocation { amount: 1_000, new_remaining: 0 });
    }

    #[test]
    fn zero_divisor_rejected() {
        assert_eq!(
            allocate(1_000, 0).unwrap_err(),
            RewardsError::InvalidArgument(InvalidArgument::DivisorOutOfRange)
        );
    }

    #[test]
    fn max_pool_does_not_overflow() {
        let a = allocate(Amount::MAX, 2).unwrap();
        assert_eq!(a.amount + a.new_remaining, Amount::MAX);
    }

    // ------------------------------------------------------------------
    // project / remaining_after
    // ------------------------------------------------------------------

    #[test]
    fn project_four_trades_of_reference_pool() {
        let schedule = project(DEFAULT_INITIAL_REMAINING, DEFAULT_DIVISOR, 4).unwrap();
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[3].amount, 1_999_998_800_000_239_999);
        let total: Amount = schedule.iter().map(|a| a.amount).sum();
        assert_eq!(total, 7_999_997_600_000_319_999);
        assert_eq!(schedule[3].new_remaining, 9_999_992_000_002_399_999_680_001);
    }

    #[test]
    fn project_zero_trades_is_empty() {
        assert!(project(1_000, 10, 0).unwrap().is_empty());
    }

    #[test]
    fn project_unbounded_count_stops_at_dust() {
        let schedule = project(1_000, 10, usize::MAX).unwrap();
        let last = schedule.last().unwrap();
        assert_eq!(last.amount, 0);
        assert!(last.new_remaining < 10);
        assert!(schedule[..schedule.len() - 1].iter().all(|a| a.amount > 0));
        assert_eq!(last.new_remaining, remaining_after(1_000, 10, u64::MAX).unwrap());
    }

    #[test]
    fn project_empty_pool_yields_single_zero() {
        assert_eq!(
            project(0, 10, 5).unwrap(),
            vec![Allocation { amount: 0, new_remaining: 0 }]
        );
    }

    #[test]
    fn remaining_after_matches_projection() {
        let schedule = project(1_000, 10, 5).unwrap();
        assert_eq!(
            remaining_after(1_000, 10, 5).unwrap(),
            schedule.last().unwrap().new_remaining
        );
    }

    #[test]
    fn remaining_after_stops_at_dust() {
        // 1_000 / 10 decays until fewer than 10 units remain.
        let pool = remaining_after(1_000, 10, u64::MAX).unwrap();
        assert!(pool < 10);
        assert_eq!(allocate(pool, 10).unwrap().amount, 0);
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn allocation_bounds(remaining in any::<u128>(), divisor in 1u128..=u128::MAX) {
                let a = allocate(remaining, divisor).unwrap();
                prop_assert_eq!(a.amount, remaining / divisor);
                prop_assert_eq!(a.new_remaining, remaining - a.amount);
                prop_assert!(a.amount <= remaining);
                prop_assert!(a.new_remaining <= remaining);
            }

            #[test]
            fn schedule_conserves_pool(
                remaining in 0u128..=DEFAULT_INITIAL_REMAINING * 1_000,
                divisor in 1u128..=10_000_000,
                trades in 0usize..64,
            ) {
                let schedule = project(remaining, divisor, trades).unwrap();
                let total: u128 = schedule.iter().map(|a| a.amount).sum();
                let end = schedule.last().map_or(remaining, |a| a.new_remaining);
                prop_assert_eq!(remaining - end, total);
            }

            #[test]
            fn schedule_is_non_increasing(
                remaining in 0u128..=DEFAULT_INITIAL_REMAINING,
                divisor in 1u128..=1_000,
                trades in 1usize..32,
            ) {
                let schedule = project(remaining, divisor, trades).unwrap();
                for pair in schedule.windows(2) {
                    prop_assert!(pair[1].amount <= pair[0].amount);
                }
            }
        }
    }
}
