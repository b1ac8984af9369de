//! Owner-gated administration.
//!
//! Every setter checks the owner gate before validating its argument and
//! emits one audit record carrying `(actor, old, new)`.

use tracing::info;

use rewards_core::audit::AuditRecord;
use rewards_core::error::{InvalidArgument, RewardsError};
use rewards_core::traits::AuditSink;
use rewards_core::types::{AccountId, Amount};

use crate::ledger::TraderRewards;

impl<A: AuditSink> TraderRewards<A> {
    /// Point the ledger at a different reward token.
    pub fn set_token(&mut self, caller: &AccountId, new: AccountId) -> Result<(), RewardsError> {
        self.access.only_owner(caller)?;
        if new.is_zero() {
            return Err(InvalidArgument::ZeroToken.into());
        }
        let old = std::mem::replace(&mut self.token, new);
        info!(actor = %caller, %old, %new, "token changed");
        self.audit.emit(AuditRecord::TokenChanged { actor: *caller, old, new });
        Ok(())
    }

    /// Replace the principal allowed to record trades.
    pub fn set_recorder(&mut self, caller: &AccountId, new: AccountId) -> Result<(), RewardsError> {
        self.access.only_owner(caller)?;
        if new.is_zero() {
            return Err(InvalidArgument::ZeroRecorder.into());
        }
        let old = std::mem::replace(&mut self.recorder, new);
        info!(actor = %caller, %old, %new, "recorder changed");
        self.audit.emit(AuditRecord::RecorderChanged { actor: *caller, old, new });
        Ok(())
    }

    /// Change the allocation denominator. Must be non-zero.
    pub fn set_divisor(&mut self, caller: &AccountId, new: Amount) -> Result<(), RewardsError> {
        self.access.only_owner(caller)?;
        if new == 0 {
            return Err(InvalidArgument::DivisorOutOfRange.into());
        }
        let old = std::mem::replace(&mut self.divisor, new);
        info!(actor = %caller, old = %old, new = %new, "divisor changed");
        self.audit.emit(AuditRecord::DivisorChanged { actor: *caller, old, new });
        Ok(())
    }

    /// Overwrite the pool size. Any value is accepted, including 0.
    ///
    /// This is independent of the ledger's real token balance; topping up the
    /// pool without funding the holder account only grows future shortfalls.
    pub fn set_remaining(&mut self, caller: &AccountId, new: Amount) -> Result<(), RewardsError> {
        self.access.only_owner(caller)?;
        let old = std::mem::replace(&mut self.remaining, new);
        info!(actor = %caller, old = %old, new = %new, "remaining pool changed");
        self.audit.emit(AuditRecord::RemainingChanged { actor: *caller, old, new });
        Ok(())
    }

    /// Hand the owner capability to `new_owner` (non-zero).
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), RewardsError> {
        let previous = self.access.transfer_ownership(caller, new_owner)?;
        info!(%previous, new = %new_owner, "ownership transferred");
        self.audit.emit(AuditRecord::OwnershipTransferred { previous, new: new_owner });
        Ok(())
    }

    /// Give up the owner capability. Administration is disabled for good.
    pub fn renounce_ownership(&mut self, caller: &AccountId) -> Result<(), RewardsError> {
        let previous = self.access.renounce_ownership(caller)?;
        info!(%previous, "ownership renounced");
        self.audit.emit(AuditRecord::OwnershipTransferred { previous, new: AccountId::ZERO });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::fixtures::*;
    use rewards_core::audit::AuditRecord;
    use rewards_core::constants::{DEFAULT_DIVISOR, DEFAULT_INITIAL_REMAINING};
    use rewards_core::error::{InvalidArgument, RewardsError, Unauthorized};
    use rewards_core::types::AccountId;

    const NOT_OWNER: RewardsError = RewardsError::Unauthorized(Unauthorized::NotOwner);
    const ROUTER2: AccountId = AccountId([0x05; 20]);

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    #[test]
    fn set_recorder_swaps_capability() {
        let mut l = reference_ledger();
        l.set_recorder(&OWNER, ROUTER2).unwrap();
        assert_eq!(l.recorder(), ROUTER2);
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::RecorderChanged { actor: OWNER, old: RECORDER, new: ROUTER2 }]
        );

        assert!(l.record_trade(&RECORDER, &trader(1)).is_err());
        assert!(l.record_trade(&ROUTER2, &trader(1)).is_ok());
    }

    #[test]
    fn set_token_records_change() {
        let mut l = reference_ledger();
        l.set_token(&OWNER, ALICE).unwrap();
        assert_eq!(l.token(), ALICE);
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::TokenChanged { actor: OWNER, old: TOKEN_ADDR, new: ALICE }]
        );
    }

    #[test]
    fn set_divisor_records_change() {
        let mut l = reference_ledger();
        l.set_divisor(&OWNER, 10_000_000).unwrap();
        assert_eq!(l.divisor(), 10_000_000);
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::DivisorChanged { actor: OWNER, old: DEFAULT_DIVISOR, new: 10_000_000 }]
        );
    }

    #[test]
    fn set_remaining_records_change() {
        let mut l = reference_ledger();
        let doubled = 2 * DEFAULT_INITIAL_REMAINING;
        l.set_remaining(&OWNER, doubled).unwrap();
        assert_eq!(l.remaining(), doubled);
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::RemainingChanged {
                actor: OWNER,
                old: DEFAULT_INITIAL_REMAINING,
                new: doubled,
            }]
        );
    }

    #[test]
    fn set_remaining_accepts_zero() {
        let mut l = reference_ledger();
        l.set_remaining(&OWNER, 0).unwrap();
        assert_eq!(l.record_trade(&RECORDER, &trader(1)).unwrap(), 0);
    }

    #[test]
    fn new_divisor_applies_to_next_trade() {
        let mut l = ledger(10, 1_000);
        l.set_divisor(&OWNER, 4).unwrap();
        assert_eq!(l.record_trade(&RECORDER, &trader(1)).unwrap(), 250);
    }

    // ------------------------------------------------------------------
    // Argument validation
    // ------------------------------------------------------------------

    #[test]
    fn zero_arguments_rejected() {
        let mut l = reference_ledger();
        assert_eq!(
            l.set_token(&OWNER, AccountId::ZERO).unwrap_err(),
            RewardsError::InvalidArgument(InvalidArgument::ZeroToken)
        );
        assert_eq!(
            l.set_recorder(&OWNER, AccountId::ZERO).unwrap_err(),
            RewardsError::InvalidArgument(InvalidArgument::ZeroRecorder)
        );
        assert_eq!(
            l.set_divisor(&OWNER, 0).unwrap_err(),
            RewardsError::InvalidArgument(InvalidArgument::DivisorOutOfRange)
        );
        assert_eq!(l.audit().len(), 1);
    }

    #[test]
    fn owner_gate_checked_before_arguments() {
        let mut l = reference_ledger();
        assert_eq!(l.set_divisor(&ALICE, 0).unwrap_err(), NOT_OWNER);
        assert_eq!(l.set_token(&ALICE, AccountId::ZERO).unwrap_err(), NOT_OWNER);
    }

    // ------------------------------------------------------------------
    // Owner gate
    // ------------------------------------------------------------------

    #[test]
    fn strangers_cannot_administer() {
        let mut l = reference_ledger();
        let before = l.snapshot();
        assert_eq!(l.set_token(&ALICE, ALICE).unwrap_err(), NOT_OWNER);
        assert_eq!(l.set_recorder(&ALICE, ALICE).unwrap_err(), NOT_OWNER);
        assert_eq!(l.set_divisor(&ALICE, 1).unwrap_err(), NOT_OWNER);
        assert_eq!(l.set_remaining(&ALICE, 1).unwrap_err(), NOT_OWNER);
        assert_eq!(l.transfer_ownership(&ALICE, ALICE).unwrap_err(), NOT_OWNER);
        assert_eq!(l.renounce_ownership(&ALICE).unwrap_err(), NOT_OWNER);
        assert_eq!(l.snapshot(), before);
        assert_eq!(l.audit().len(), 1);
    }

    #[test]
    fn recorder_cannot_administer() {
        let mut l = reference_ledger();
        assert_eq!(l.set_remaining(&RECORDER, 1).unwrap_err(), NOT_OWNER);
    }

    #[test]
    fn transfer_ownership_moves_admin_rights() {
        let mut l = reference_ledger();
        l.transfer_ownership(&OWNER, ALICE).unwrap();
        assert_eq!(l.owner(), ALICE);
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::OwnershipTransferred { previous: OWNER, new: ALICE }]
        );
        assert_eq!(l.set_divisor(&OWNER, 7).unwrap_err(), NOT_OWNER);
        l.set_divisor(&ALICE, 7).unwrap();
    }

    #[test]
    fn transfer_ownership_to_zero_rejected() {
        let mut l = reference_ledger();
        assert_eq!(
            l.transfer_ownership(&OWNER, AccountId::ZERO).unwrap_err(),
            RewardsError::InvalidArgument(InvalidArgument::ZeroNewOwner)
        );
        assert_eq!(l.owner(), OWNER);
    }

    #[test]
    fn renounce_disables_administration_but_not_trading() {
        let mut l = ledger(10, 1_000);
        let mut host = funded(1_000);
        l.renounce_ownership(&OWNER).unwrap();
        assert!(l.owner().is_zero());
        assert_eq!(
            l.audit().tail(1),
            &[AuditRecord::OwnershipTransferred { previous: OWNER, new: AccountId::ZERO }]
        );

        assert_eq!(l.set_remaining(&OWNER, 1).unwrap_err(), NOT_OWNER);
        assert_eq!(l.set_remaining(&AccountId::ZERO, 1).unwrap_err(), NOT_OWNER);

        l.record_trade(&RECORDER, &trader(1)).unwrap();
        assert_eq!(l.withdraw(&trader(1), &mut host).unwrap(), 100);
    }
}
