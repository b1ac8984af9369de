//! Protocol constants. All token quantities are in base units (1 token = 10^18 units).

use crate::types::Amount;

/// Number of fractional decimal digits carried by the reward token.
pub const TOKEN_DECIMALS: u32 = 18;

/// One whole token in base units.
pub const TOKEN: Amount = 10u128.pow(TOKEN_DECIMALS);

/// Divisor used by the reference deployment: each trade claims one
/// five-millionth of the remaining pool.
pub const DEFAULT_DIVISOR: Amount = 5_000_000;

/// Initial pool of the reference deployment (10 million tokens).
pub const DEFAULT_INITIAL_REMAINING: Amount = 10_000_000 * TOKEN;

/// Length of an [`AccountId`](crate::types::AccountId) in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;
