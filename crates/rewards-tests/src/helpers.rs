//! Shared test helpers for E2E and adversarial tests.

use rewards_core::audit::{AuditLog, AuditRecord};
use rewards_core::constants::{DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING};
use rewards_core::error::TokenError;
use rewards_core::traits::TokenProvider;
use rewards_core::types::{AccountId, Amount};
use rewards_ledger::{LedgerParams, MemoryTokenHost, TraderRewards};

pub const OWNER: AccountId = AccountId([0x01; 20]);
pub const LEDGER: AccountId = AccountId([0x02; 20]);
pub const TOKEN: AccountId = AccountId([0x03; 20]);
pub const RECORDER: AccountId = AccountId([0x04; 20]);

/// Trader account from a seed byte.
pub fn trader(seed: u8) -> AccountId {
    AccountId([0x10u8.wrapping_add(seed); 20])
}

/// A deployed ledger with its token host.
pub struct Deployment {
    pub ledger: TraderRewards,
    pub tokens: MemoryTokenHost,
}

impl Deployment {
    /// Deploy with explicit parameters and mint `liquidity` to the ledger.
    pub fn new(divisor: Amount, initial_remaining: Amount, liquidity: Amount) -> Self {
        let params = LedgerParams { token: TOKEN, recorder: RECORDER, divisor, initial_remaining };
        let ledger = TraderRewards::create(OWNER, LEDGER, params, AuditLog::new()).unwrap();
        let mut tokens = MemoryTokenHost::new();
        if liquidity > 0 {
            tokens.mint(&TOKEN, &LEDGER, liquidity).unwrap();
        }
        Self { ledger, tokens }
    }

    /// Reference deployment: 1e25 pool, divisor 5_000_000, liquidity equal to the pool.
    pub fn reference() -> Self {
        Self::new(DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING, DEFAULT_INITIAL_REMAINING)
    }

    pub fn record(&mut self, trader: &AccountId) -> Amount {
        self.ledger.record_trade(&RECORDER, trader).unwrap()
    }

    pub fn withdraw(&mut self, trader: &AccountId) -> Amount {
        self.ledger.withdraw(trader, &mut self.tokens).unwrap()
    }

    /// Reward token balance of `holder`.
    pub fn balance(&self, holder: &AccountId) -> Amount {
        self.tokens.balance_of(&TOKEN, holder)
    }

    /// Reward tokens the ledger itself holds.
    pub fn liquidity(&self) -> Amount {
        self.balance(&LEDGER)
    }

    pub fn records(&self) -> &[AuditRecord] {
        self.ledger.audit().records()
    }
}

/// Token backend whose transfers always fail in the given way.
pub enum BrokenToken {
    /// `transfer` reports `Ok(false)`.
    Refuses,
    /// `transfer` returns an error.
    Errors,
}

impl TokenProvider for BrokenToken {
    fn balance_of(&self, _token: &AccountId, _holder: &AccountId) -> Amount {
        Amount::MAX
    }

    fn transfer(
        &mut self,
        _token: &AccountId,
        _from: &AccountId,
        _to: &AccountId,
        _amount: Amount,
    ) -> Result<bool, TokenError> {
        match self {
            BrokenToken::Refuses => Ok(false),
            BrokenToken::Errors => Err(TokenError::Rejected("paused".into())),
        }
    }
}
