//! Admission records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admitted pending action.
///
/// Both keys were recorded at `admitted_at`; a later notification matching
/// either is a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in admission order, starting at 0.
    pub sequence: u64,
    pub action_id: String,
    /// `session:message:call`.
    pub composite: String,
    pub admitted_at: DateTime<Utc>,
}
