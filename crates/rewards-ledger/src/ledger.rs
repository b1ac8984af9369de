//! Ledger state and construction.
//!
//! [`TraderRewards`] owns the configuration, the reward pool and the
//! per-trader entitlements, plus the [`AuditSink`] its operations emit into.
//! Trade recording, withdrawal and administration live in sibling modules
//! as further `impl` blocks on the same type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use rewards_core::audit::{AuditLog, AuditRecord};
use rewards_core::error::{InvalidArgument, RewardsError};
use rewards_core::traits::AuditSink;
use rewards_core::types::{amount_serde, AccountId, Amount};

use crate::access::Ownable;

/// Deployment parameters supplied at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerParams {
    /// Address of the reward token.
    pub token: AccountId,
    /// The sole principal allowed to record trades.
    pub recorder: AccountId,
    /// Denominator of the per-trade allocation fraction.
    pub divisor: Amount,
    /// Initial pool size.
    pub initial_remaining: Amount,
}

impl LedgerParams {
    /// Validate in the order token, recorder, divisor, initial pool.
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.token.is_zero() {
            return Err(InvalidArgument::ZeroToken);
        }
        if self.recorder.is_zero() {
            return Err(InvalidArgument::ZeroRecorder);
        }
        if self.divisor == 0 {
            return Err(InvalidArgument::DivisorOutOfRange);
        }
        if self.initial_remaining == 0 {
            return Err(InvalidArgument::InitialRewardOutOfRange);
        }
        Ok(())
    }
}

/// The rewards ledger.
///
/// Invariants upheld by every operation:
/// - `divisor > 0`
/// - each recorded trade moves exactly its allocation from `remaining`
///   into one trader's entitlement
/// - entitlements only grow through trade recording and only drop (to 0)
///   through a successful withdrawal
/// - failed operations mutate nothing and emit nothing
#[derive(Debug)]
pub struct TraderRewards<A: AuditSink = AuditLog> {
    /// Holder account whose token balance backs withdrawals.
    pub(crate) address: AccountId,
    pub(crate) token: AccountId,
    pub(crate) recorder: AccountId,
    pub(crate) divisor: Amount,
    pub(crate) access: Ownable,
    pub(crate) remaining: Amount,
    pub(crate) entitlements: BTreeMap<AccountId, Amount>,
    pub(crate) audit: A,
}

impl<A: AuditSink> TraderRewards<A> {
    /// Construct a ledger owned by `deployer`, holding its tokens at `address`.
    ///
    /// # Errors
    ///
    /// One [`InvalidArgument`] per parameter: `ZeroToken`, `ZeroRecorder`,
    /// `DivisorOutOfRange`, `InitialRewardOutOfRange`.
    pub fn create(
        deployer: AccountId,
        address: AccountId,
        params: LedgerParams,
        mut audit: A,
    ) -> Result<Self, RewardsError> {
        params.validate()?;

        info!(
            owner = %deployer,
            token = %params.token,
            recorder = %params.recorder,
            divisor = %params.divisor,
            initial_remaining = %params.initial_remaining,
            "rewards ledger created"
        );
        audit.emit(AuditRecord::Created {
            owner: deployer,
            token: params.token,
            recorder: params.recorder,
            divisor: params.divisor,
            initial_remaining: params.initial_remaining,
        });

        Ok(Self {
            address,
            token: params.token,
            recorder: params.recorder,
            divisor: params.divisor,
            access: Ownable::new(deployer),
            remaining: params.initial_remaining,
            entitlements: BTreeMap::new(),
            audit,
        })
    }

    /// Rebuild a ledger from a snapshot. Emits nothing.
    ///
    /// The snapshot's configuration is re-validated; a zero pool is allowed
    /// since a live ledger can legitimately drain to 0. Entitlement rows are
    /// taken as given: if a trader appears twice the later row wins.
    /// [`StateFile`](crate::store::StateFile) rejects such snapshots first.
    pub fn restore(snapshot: LedgerSnapshot, audit: A) -> Result<Self, RewardsError> {
        LedgerParams {
            token: snapshot.token,
            recorder: snapshot.recorder,
            divisor: snapshot.divisor,
            initial_remaining: 1,
        }
        .validate()?;

        let entitlements = snapshot
            .entitlements
            .into_iter()
            .map(|e| (e.trader, e.amount))
            .collect();

        Ok(Self {
            address: snapshot.address,
            token: snapshot.token,
            recorder: snapshot.recorder,
            divisor: snapshot.divisor,
            access: Ownable::new(snapshot.owner),
            remaining: snapshot.remaining,
            entitlements,
            audit,
        })
    }

    /// Capture configuration, pool and entitlements.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            address: self.address,
            token: self.token,
            recorder: self.recorder,
            divisor: self.divisor,
            owner: self.access.owner(),
            remaining: self.remaining,
            entitlements: self
                .entitlements
                .iter()
                .map(|(trader, amount)| Entitlement { trader: *trader, amount: *amount })
                .collect(),
        }
    }

    pub fn address(&self) -> AccountId {
        self.address
    }

    pub fn token(&self) -> AccountId {
        self.token
    }

    pub fn recorder(&self) -> AccountId {
        self.recorder
    }

    pub fn divisor(&self) -> Amount {
        self.divisor
    }

    /// Current owner; `AccountId::ZERO` once renounced.
    pub fn owner(&self) -> AccountId {
        self.access.owner()
    }

    /// Tokens still available for future allocation.
    pub fn remaining(&self) -> Amount {
        self.remaining
    }

    /// Unwithdrawn entitlement of `trader` (0 if never credited).
    pub fn entitlement(&self, trader: &AccountId) -> Amount {
        self.entitlements.get(trader).copied().unwrap_or(0)
    }

    /// Every trader that has ever been credited, with current entitlement.
    pub fn traders(&self) -> impl Iterator<Item = (&AccountId, &Amount)> {
        self.entitlements.iter()
    }

    /// Sum of all unwithdrawn entitlements.
    pub fn total_entitlement(&self) -> Amount {
        self.entitlements
            .values()
            .fold(0, |acc: Amount, v| acc.saturating_add(*v))
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn audit_mut(&mut self) -> &mut A {
        &mut self.audit
    }

    /// Consume the ledger, returning its audit sink.
    pub fn into_audit(self) -> A {
        self.audit
    }
}

/// One trader's entitlement in a [`LedgerSnapshot`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Entitlement {
    pub trader: AccountId,
    #[serde(with = "amount_serde")]
    pub amount: Amount,
}

/// Serializable image of a [`TraderRewards`] ledger (without its audit sink).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub address: AccountId,
    pub token: AccountId,
    pub recorder: AccountId,
    #[serde(with = "amount_serde")]
    pub divisor: Amount,
    pub owner: AccountId,
    #[serde(with = "amount_serde")]
    pub remaining: Amount,
    pub entitlements: Vec<Entitlement>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use rewards_core::constants::{DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING};

    use crate::token::MemoryTokenHost;

    pub const OWNER: AccountId = AccountId([0x01; 20]);
    pub const LEDGER: AccountId = AccountId([0x02; 20]);
    pub const TOKEN_ADDR: AccountId = AccountId([0x03; 20]);
    pub const RECORDER: AccountId = AccountId([0x04; 20]);
    pub const ALICE: AccountId = AccountId([0xA1; 20]);

    pub fn trader(n: u8) -> AccountId {
        AccountId([0x10 + n; 20])
    }

    pub fn params(divisor: Amount, initial_remaining: Amount) -> LedgerParams {
        LedgerParams { token: TOKEN_ADDR, recorder: RECORDER, divisor, initial_remaining }
    }

    pub fn ledger(divisor: Amount, initial_remaining: Amount) -> TraderRewards {
        TraderRewards::create(OWNER, LEDGER, params(divisor, initial_remaining), AuditLog::new())
            .unwrap()
    }

    /// 1e25 pool, divisor 5_000_000.
    pub fn reference_ledger() -> TraderRewards {
        ledger(DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING)
    }

    /// Token host where the ledger holds `liquidity` reward tokens.
    pub fn funded(liquidity: Amount) -> MemoryTokenHost {
        let mut host = MemoryTokenHost::new();
        host.mint(&TOKEN_ADDR, &LEDGER, liquidity).unwrap();
        host
    }
}
