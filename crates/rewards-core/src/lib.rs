//! # rewards-core
//! Foundation types, traits and allocation math for the trader rewards ledger.
//!
//! All quantities are integer base units ([`types::Amount`]); no floating
//! point is used in any ledger computation.

pub mod allocator;
pub mod audit;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use allocator::{allocate, Allocation};
pub use audit::{AuditLog, AuditRecord};
pub use error::{InvalidArgument, RewardsError, TokenError, Unauthorized};
pub use traits::{AuditSink, TokenProvider};
pub use types::{AccountId, Amount};
