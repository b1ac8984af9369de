//! JSON state file: ledger snapshot, token balances and audit log.
//!
//! Saves go through a sibling temp file and a rename so an interrupted write
//! never leaves a truncated state file behind.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use rewards_core::audit::AuditLog;

use crate::error::StateError;
use crate::ledger::{LedgerSnapshot, TraderRewards};
use crate::token::MemoryTokenHost;

/// Current state file format version.
pub const STATE_VERSION: u32 = 1;

/// Everything the CLI persists between invocations.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StateFile {
    pub version: u32,
    pub ledger: LedgerSnapshot,
    pub tokens: MemoryTokenHost,
    pub audit: AuditLog,
}

impl StateFile {
    /// Capture a live ledger (and its audit log) together with the token host.
    pub fn capture(ledger: &TraderRewards<AuditLog>, tokens: &MemoryTokenHost) -> Self {
        Self {
            version: STATE_VERSION,
            ledger: ledger.snapshot(),
            tokens: tokens.clone(),
            audit: ledger.audit().clone(),
        }
    }

    /// Rebuild the live ledger and token host.
    ///
    /// A trader listed twice in the entitlement table is rejected rather than
    /// merged.
    pub fn into_parts(self) -> Result<(TraderRewards<AuditLog>, MemoryTokenHost), StateError> {
        let mut seen = BTreeSet::new();
        for e in &self.ledger.entitlements {
            if !seen.insert(e.trader) {
                return Err(StateError::Serialization(format!(
                    "duplicate entitlement for trader {}",
                    e.trader
                )));
            }
        }
        let ledger = TraderRewards::restore(self.ledger, self.audit)?;
        Ok((ledger, self.tokens))
    }

    pub fn load(path: &Path) -> Result<Self, StateError> {
        let data = fs::read(path)?;
        let state: Self = serde_json::from_slice(&data)?;
        if state.version != STATE_VERSION {
            return Err(StateError::Serialization(format!(
                "unsupported state version {} (expected {STATE_VERSION})",
                state.version
            )));
        }
        debug!(path = %path.display(), "loaded state file");
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), bytes = data.len(), "saved state file");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
