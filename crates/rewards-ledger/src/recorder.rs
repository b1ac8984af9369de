//! Trade recording.

use tracing::debug;

use rewards_core::allocator::{allocate, Allocation};
use rewards_core::audit::AuditRecord;
use rewards_core::error::{InvalidArgument, RewardsError};
use rewards_core::traits::AuditSink;
use rewards_core::types::{AccountId, Amount};

use crate::access::only_recorder;
use crate::ledger::TraderRewards;

impl<A: AuditSink> TraderRewards<A> {
    /// Record one trade by `trader`, crediting `remaining / divisor` of the
    /// pool to them. Returns the allocated amount, which may be 0 once the
    /// pool is smaller than the divisor.
    ///
    /// # Errors
    ///
    /// - [`Unauthorized::NotRecorder`](rewards_core::Unauthorized::NotRecorder)
    ///   if `caller` is not the recorder
    /// - [`InvalidArgument::ZeroTrader`] if `trader` is the null identity
    /// - [`RewardsError::ArithmeticOverflow`] if the trader's entitlement
    ///   would overflow
    pub fn record_trade(
        &mut self,
        caller: &AccountId,
        trader: &AccountId,
    ) -> Result<Amount, RewardsError> {
        only_recorder(&self.recorder, caller)?;
        if trader.is_zero() {
            return Err(InvalidArgument::ZeroTrader.into());
        }

        let Allocation { amount, new_remaining } = allocate(self.remaining, self.divisor)?;
        let credited = self
            .entitlement(trader)
            .checked_add(amount)
            .ok_or(RewardsError::ArithmeticOverflow)?;

        self.remaining = new_remaining;
        self.entitlements.insert(*trader, credited);

        debug!(%trader, amount = %amount, remaining = %new_remaining, "recorded trade");
        self.audit.emit(AuditRecord::TradeRecorded { trader: *trader, amount });
        Ok(amount)
    }
}
