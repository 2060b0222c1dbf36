//! Pipeline outcomes and invocation identity.
//!
//! `PreambleOutcome` is what `Orchestrator::handle` returns. None of its
//! variants is an error from the host's point of view: the approval flow
//! proceeds identically in every case.

use serde::{Deserialize, Serialize};

use crate::event::NoticeRejection;

/// Correlation id for one handler invocation, attached to every log line it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(pub uuid::Uuid);

impl InvocationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Why an event never entered the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Not a `permission.*` event, or its record did not decode.
    NotPermission,
    Notice(NoticeRejection),
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PreambleOutcome {
    Ignored { reason: IgnoreReason },
    /// The ledger had already seen this action.
    Duplicate,
    /// The anchor message could not be fetched; nothing to summarize.
    AnchorUnavailable { reason: String },
    /// The assistant already explained the action well enough.
    NarrationSufficient,
    Dispatched,
    DispatchFailed { reason: String },
}

impl PreambleOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, PreambleOutcome::Dispatched)
    }
}
