//! Capability guards: the single-owner gate and the recorder check.

use rewards_core::error::{InvalidArgument, RewardsError, Unauthorized};
use rewards_core::types::AccountId;

/// Single-owner access gate.
///
/// Once renounced the owner is [`AccountId::ZERO`] and no caller, including
/// the zero identity itself, passes [`only_owner`](Self::only_owner).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ownable {
    owner: AccountId,
}

impl Ownable {
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    /// Current owner; `AccountId::ZERO` after renunciation.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn is_renounced(&self) -> bool {
        self.owner.is_zero()
    }

    /// Fails with [`Unauthorized::NotOwner`] unless `caller` is the live owner.
    pub fn only_owner(&self, caller: &AccountId) -> Result<(), Unauthorized> {
        if self.is_renounced() || *caller != self.owner {
            return Err(Unauthorized::NotOwner);
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`. Returns the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<AccountId, RewardsError> {
        self.only_owner(caller)?;
        if new_owner.is_zero() {
            return Err(InvalidArgument::ZeroNewOwner.into());
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Give up ownership permanently. Returns the previous owner.
    pub fn renounce_ownership(&mut self, caller: &AccountId) -> Result<AccountId, RewardsError> {
        self.only_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, AccountId::ZERO))
    }
}

/// Fails with [`Unauthorized::NotRecorder`] unless `caller` is `recorder`.
pub fn only_recorder(recorder: &AccountId, caller: &AccountId) -> Result<(), Unauthorized> {
    if caller != recorder {
        return Err(Unauthorized::NotRecorder);
    }
    Ok(())
}
