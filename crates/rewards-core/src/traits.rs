//! Collaborator interfaces for the rewards ledger.
//!
//! - [`TokenProvider`]: fungible-token balances and transfers (rewards-ledger
//!   ships an in-memory host; production embedders bridge to a real token)
//! - [`AuditSink`]: receiver for emitted [`AuditRecord`]s

use crate::audit::AuditRecord;
use crate::error::TokenError;
use crate::types::{AccountId, Amount};

/// Fungible-token collaborator.
///
/// Calls are routed by the token's address, so a ledger whose token reference
/// is changed by its owner transparently starts reading the new token.
pub trait TokenProvider {
    /// Balance of `holder` in `token`. Unknown tokens and holders report 0.
    fn balance_of(&self, token: &AccountId, holder: &AccountId) -> Amount;

    /// Move `amount` of `token` from `from` to `to`.
    ///
    /// `Ok(false)` and `Err(_)` both mean the transfer did not happen; the
    /// caller must abort.
    fn transfer(
        &mut self,
        token: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<bool, TokenError>;
}

/// Receiver for audit records.
pub trait AuditSink {
    fn emit(&mut self, record: AuditRecord);
}

/// Discarding sink.
impl AuditSink for () {
    fn emit(&mut self, _record: AuditRecord) {}
}

impl<S: AuditSink + ?Sized> AuditSink for &mut S {
    fn emit(&mut self, record: AuditRecord) {
        (**self).emit(record);
    }
}
