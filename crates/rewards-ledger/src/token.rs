//! In-memory fungible-token host.
//!
//! Holds balances for any number of tokens, keyed by token address. Used by
//! the CLI as its persistent token backend and by tests as the liquidity
//! source for withdrawals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rewards_core::error::TokenError;
use rewards_core::traits::TokenProvider;
use rewards_core::types::{amount_serde, AccountId, Amount};

/// One `(token, holder, balance)` row of the serialized host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BalanceEntry {
    pub token: AccountId,
    pub holder: AccountId,
    #[serde(with = "amount_serde")]
    pub balance: Amount,
}

/// Balances of every `(token, holder)` pair. Missing pairs hold 0.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<BalanceEntry>", into = "Vec<BalanceEntry>")]
pub struct MemoryTokenHost {
    balances: BTreeMap<(AccountId, AccountId), Amount>,
}

impl MemoryTokenHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `holder` out of thin air.
    pub fn mint(
        &mut self,
        token: &AccountId,
        holder: &AccountId,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let entry = self.balances.entry((*token, *holder)).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| TokenError::Rejected("balance overflow".into()))?;
        debug!(%token, %holder, amount = %amount, "minted");
        Ok(())
    }

    /// Total of all balances held in `token`.
    pub fn total_supply(&self, token: &AccountId) -> Amount {
        self.balances
            .iter()
            .filter(|((t, _), _)| t == token)
            .fold(0, |acc: Amount, (_, v)| acc.saturating_add(*v))
    }

    /// Non-zero holders of `token` with their balances.
    pub fn holders(&self, token: &AccountId) -> Vec<(AccountId, Amount)> {
        self.balances
            .iter()
            .filter(|((t, _), v)| t == token && **v > 0)
            .map(|((_, h), v)| (*h, *v))
            .collect()
    }
}

impl TokenProvider for MemoryTokenHost {
    fn balance_of(&self, token: &AccountId, holder: &AccountId) -> Amount {
        self.balances.get(&(*token, *holder)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        token: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<bool, TokenError> {
        let have = self.balance_of(token, from);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }
        if from == to || amount == 0 {
            return Ok(true);
        }
        let credited = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or_else(|| TokenError::Rejected("balance overflow".into()))?;

        self.balances.insert((*token, *from), have - amount);
        self.balances.insert((*token, *to), credited);
        debug!(%token, %from, %to, amount = %amount, "transferred");
        Ok(true)
    }
}

impl From<Vec<BalanceEntry>> for MemoryTokenHost {
    fn from(entries: Vec<BalanceEntry>) -> Self {
        let mut host = Self::new();
        for e in entries {
            host.balances.insert((e.token, e.holder), e.balance);
        }
        host
    }
}

impl From<MemoryTokenHost> for Vec<BalanceEntry> {
    fn from(host: MemoryTokenHost) -> Self {
        host.balances
            .into_iter()
            .map(|((token, holder), balance)| BalanceEntry { token, holder, balance })
            .collect()
    }
}
