//! # rewards-ledger
//! Trader rewards ledger.
//!
//! All calculations use integer arithmetic only.
//!
//! - **Trade recording**: the recorder reports a trade and the trader is
//!   credited `remaining / divisor` of the pool.
//! - **Withdrawal**: a trader's entitlement is paid out, capped at the
//!   ledger's real token balance. Any shortfall is forfeited.
//! - **Administration**: owner-gated configuration setters and ownership
//!   transfer/renunciation.
//!
//! Every operation takes `&mut self` and runs to completion or fails without
//! mutating anything. [`SharedLedger`] serializes access across threads.

pub mod access;
pub mod admin;
pub mod error;
pub mod ledger;
pub mod recorder;
pub mod shared;
pub mod store;
pub mod token;
pub mod withdrawal;

pub use access::Ownable;
pub use error::StateError;
pub use ledger::{LedgerParams, LedgerSnapshot, TraderRewards};
pub use shared::SharedLedger;
pub use store::StateFile;
pub use token::MemoryTokenHost;
