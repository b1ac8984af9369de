//! Withdrawal of accumulated entitlement.
//!
//! Payout is capped at the ledger's actual token balance. The entitlement is
//! consumed in full on every successful withdrawal, so a trader whose
//! entitlement exceeds the available liquidity forfeits the difference.

use tracing::{info, warn};

use rewards_core::audit::AuditRecord;
use rewards_core::error::RewardsError;
use rewards_core::traits::{AuditSink, TokenProvider};
use rewards_core::types::{AccountId, Amount};

use crate::ledger::TraderRewards;

impl<A: AuditSink> TraderRewards<A> {
    /// Pay `trader` their entitlement, capped at the ledger's token balance.
    /// Returns the amount actually transferred.
    ///
    /// # Errors
    ///
    /// - [`RewardsError::NothingToWithdraw`] if the entitlement is 0
    /// - [`RewardsError::NoLiquidity`] if the ledger holds no reward tokens
    /// - [`RewardsError::TransferFailed`] if the token refuses the transfer
    ///
    /// The ledger is untouched on every error path.
    pub fn withdraw<T>(&mut self, trader: &AccountId, tokens: &mut T) -> Result<Amount, RewardsError>
    where
        T: TokenProvider + ?Sized,
    {
        let entitlement = self.entitlement(trader);
        if entitlement == 0 {
            return Err(RewardsError::NothingToWithdraw);
        }

        let available = tokens.balance_of(&self.token, &self.address);
        if available == 0 {
            return Err(RewardsError::NoLiquidity);
        }

        let amount = entitlement.min(available);
        match tokens.transfer(&self.token, &self.address, trader, amount) {
            Ok(true) => {}
            Ok(false) => {
                warn!(%trader, amount = %amount, "token refused reward transfer");
                return Err(RewardsError::TransferFailed("token returned false".into()));
            }
            Err(e) => {
                warn!(%trader, amount = %amount, "reward transfer failed: {e}");
                return Err(e.into());
            }
        }

        self.entitlements.insert(*trader, 0);

        if amount < entitlement {
            warn!(
                %trader,
                entitlement = %entitlement,
                paid = %amount,
                forfeited = %(entitlement - amount),
                "withdrawal capped by liquidity; shortfall forfeited"
            );
        }
        info!(%trader, amount = %amount, "reward withdrawn");

        self.audit.emit(AuditRecord::Withdrawal { trader: *trader, amount });
        self.audit.emit(AuditRecord::Transfer { recipient: *trader, amount });
        Ok(amount)
    }
}
