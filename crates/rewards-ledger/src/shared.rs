//! Thread-safe handle serializing every ledger operation.
//!
//! The ledger and its token backend sit behind one `parking_lot::Mutex`, so
//! operations submitted from different threads run one at a time, each to
//! completion. Which of two racing callers goes first is unspecified; each
//! sees the pool exactly as the previous operation left it.

use std::sync::Arc;

use parking_lot::Mutex;

use rewards_core::audit::AuditLog;
use rewards_core::error::RewardsError;
use rewards_core::traits::TokenProvider;
use rewards_core::types::{AccountId, Amount};

use crate::ledger::TraderRewards;
use crate::token::MemoryTokenHost;

struct Inner<T> {
    ledger: TraderRewards<AuditLog>,
    tokens: T,
}

/// Cloneable, `Send + Sync` handle to a ledger and its token backend.
pub struct SharedLedger<T = MemoryTokenHost> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for SharedLedger<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: TokenProvider> SharedLedger<T> {
    pub fn new(ledger: TraderRewards<AuditLog>, tokens: T) -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { ledger, tokens })) }
    }

    /// See [`TraderRewards::record_trade`].
    pub fn record_trade(&self, caller: &AccountId, trader: &AccountId) -> Result<Amount, RewardsError> {
        self.inner.lock().ledger.record_trade(caller, trader)
    }

    /// See [`TraderRewards::withdraw`].
    pub fn withdraw(&self, trader: &AccountId) -> Result<Amount, RewardsError> {
        let mut guard = self.inner.lock();
        let Inner { ledger, tokens } = &mut *guard;
        ledger.withdraw(trader, tokens)
    }

    /// Run `f` with exclusive access to the ledger and token backend.
    ///
    /// Use for administration and multi-step reads that must observe one
    /// consistent state.
    pub fn with<R>(&self, f: impl FnOnce(&mut TraderRewards<AuditLog>, &mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        let Inner { ledger, tokens } = &mut *guard;
        f(ledger, tokens)
    }

    pub fn remaining(&self) -> Amount {
        self.inner.lock().ledger.remaining()
    }

    pub fn entitlement(&self, trader: &AccountId) -> Amount {
        self.inner.lock().ledger.entitlement(trader)
    }
}
