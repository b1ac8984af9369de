//! Integration test suite for the trader rewards ledger.
//!
//! Drives full deployments (ledger, token host and audit log together)
//! through trade, withdrawal and administration sequences, including
//! hostile callers and failing token backends.

pub mod helpers;
