//! Audit records emitted by ledger operations.
//!
//! Records are emitted only after an operation has fully succeeded, so a
//! failed operation never leaves a trace in the log.

use serde::{Deserialize, Serialize};

use crate::traits::AuditSink;
use crate::types::{amount_serde, AccountId, Amount};

/// One audit record. Every admin change carries the acting principal plus
/// the old and new values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditRecord {
    /// Ledger constructed with its initial configuration.
    Created {
        owner: AccountId,
        token: AccountId,
        recorder: AccountId,
        #[serde(with = "amount_serde")]
        divisor: Amount,
        #[serde(with = "amount_serde")]
        initial_remaining: Amount,
    },
    /// A trade was recorded and `amount` credited to `trader`.
    TradeRecorded {
        trader: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// `trader` withdrew `amount` (the amount actually transferred).
    Withdrawal {
        trader: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    /// `amount` tokens left the ledger's holder account for `recipient`.
    Transfer {
        recipient: AccountId,
        #[serde(with = "amount_serde")]
        amount: Amount,
    },
    TokenChanged { actor: AccountId, old: AccountId, new: AccountId },
    RecorderChanged { actor: AccountId, old: AccountId, new: AccountId },
    DivisorChanged {
        actor: AccountId,
        #[serde(with = "amount_serde")]
        old: Amount,
        #[serde(with = "amount_serde")]
        new: Amount,
    },
    RemainingChanged {
        actor: AccountId,
        #[serde(with = "amount_serde")]
        old: Amount,
        #[serde(with = "amount_serde")]
        new: Amount,
    },
    /// Ownership moved from `previous` (the acting owner) to `new`.
    /// `new == AccountId::ZERO` records a renunciation.
    OwnershipTransferred { previous: AccountId, new: AccountId },
}

impl AuditRecord {
    /// Short event name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::TradeRecorded { .. } => "trade_recorded",
            Self::Withdrawal { .. } => "withdrawal",
            Self::Transfer { .. } => "transfer",
            Self::TokenChanged { .. } => "token_changed",
            Self::RecorderChanged { .. } => "recorder_changed",
            Self::DivisorChanged { .. } => "divisor_changed",
            Self::RemainingChanged { .. } => "remaining_changed",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }
}

/// Append-only in-memory audit log.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditLog {
    records: Vec<AuditRecord>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in emission order.
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent `n` records (fewer if the log is shorter).
    pub fn tail(&self, n: usize) -> &[AuditRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}

impl AuditSink for AuditLog {
    fn emit(&mut self, record: AuditRecord) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(seed: u8, amount: Amount) -> AuditRecord {
        AuditRecord::TradeRecorded { trader: AccountId([seed; 20]), amount }
    }

    #[test]
    fn log_appends_in_order() {
        let mut log = AuditLog::new();
        assert!(log.is_empty());
        log.emit(trade(1, 10));
        log.emit(trade(2, 20));
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0], trade(1, 10));
        assert_eq!(log.records()[1], trade(2, 20));
    }

    #[test]
    fn tail_clamps_to_length() {
        let mut log = AuditLog::new();
        log.emit(trade(1, 10));
        log.emit(trade(2, 20));
        log.emit(trade(3, 30));
        assert_eq!(log.tail(2), &[trade(2, 20), trade(3, 30)]);
        assert_eq!(log.tail(10).len(), 3);
        assert!(log.tail(0).is_empty());
    }

    #[test]
    fn records_serialize_with_event_tag() {
        let json = serde_json::to_value(trade(1, 5)).unwrap();
        assert_eq!(json["event"], "trade_recorded");
        assert_eq!(json["amount"], "5");

        let back: AuditRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, trade(1, 5));
    }

    #[test]
    fn names_match_serde_tags() {
        let rec = AuditRecord::DivisorChanged { actor: AccountId::ZERO, old: 1, new: 2 };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["event"], rec.name());
    }
}
