//! In-memory implementation of `Ledger`.
//!
//! `InMemoryLedger` keeps every key it has ever admitted for the lifetime of
//! the process: no expiry, no persistence. Clones share the same state, so a
//! host can keep one handle for inspection while the orchestrator owns another.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use narrator_contracts::action::DedupKey;
use narrator_core::traits::Ledger;

use crate::entry::LedgerEntry;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct LedgerState {
    /// Every action id and composite key admitted so far.
    pub(crate) seen: HashSet<String>,

    /// One record per admitted action, in admission order.
    pub(crate) entries: Vec<LedgerEntry>,
}

// ── Public ledger ─────────────────────────────────────────────────────────────

/// A seen-set of pending-action keys behind one mutex.
///
/// # Thread safety
///
/// `admit()` checks and records under a single lock acquisition, so two
/// overlapping notifications for the same action cannot both be admitted,
/// even from different threads.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    pub(crate) state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set stays consistent even if a holder panicked, so a poisoned
    /// lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of admitted actions.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` (an action id or a composite key) has been recorded.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().seen.contains(key)
    }

    /// Snapshot of all admissions, oldest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.lock().entries.clone()
    }
}

// ── Ledger impl ───────────────────────────────────────────────────────────────

impl Ledger for InMemoryLedger {
    fn admit(&self, key: &DedupKey) -> bool {
        let mut state = self.lock();

        if state.seen.contains(&key.action_id) || state.seen.contains(&key.composite) {
            return false;
        }

        state.seen.insert(key.action_id.clone());
        state.seen.insert(key.composite.clone());

        let sequence = state.entries.len() as u64;
        state.entries.push(LedgerEntry {
            sequence,
            action_id: key.action_id.clone(),
            composite: key.composite.clone(),
            admitted_at: Utc::now(),
        });

        debug!(
            action_id = %key.action_id,
            composite = %key.composite,
            admitted = state.entries.len(),
            "pending action admitted"
        );

        true
    }
}
