//! Trait definitions for everything the orchestrator talks to.
//!
//! The host owns all of these. The orchestrator only ever calls them, and
//! treats every one of them as fallible:
//!
//! - `MessageSource`    — read-only transcript queries
//! - `GenerationClient` — submits preamble requests to the narration profile
//! - `Notifier`         — best-effort toasts
//! - `Ledger`           — the at-most-once admission record
//!
//! `HostHooks` is the other direction: the callbacks a host invokes on us.

use async_trait::async_trait;

use narrator_contracts::{
    action::DedupKey,
    error::NarratorResult,
    event::HostEvent,
    message::ConversationMessage,
    request::{PreambleRequest, Toast},
};

/// Read access to session transcripts.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Fetch one message by id.
    async fn message(&self, session_id: &str, message_id: &str) -> NarratorResult<ConversationMessage>;

    /// List at most `limit` of the session's most recent messages, oldest first.
    async fn messages(&self, session_id: &str, limit: usize) -> NarratorResult<Vec<ConversationMessage>>;
}

/// Submission of asynchronous generation requests.
///
/// `submit` only enqueues: it resolves once the host has accepted the
/// request, not when the preamble has been generated.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn submit(&self, request: &PreambleRequest) -> NarratorResult<()>;
}

/// UI notifications. Callers discard failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show_toast(&self, toast: &Toast) -> NarratorResult<()>;
}

/// The dedup record behind the "at most one preamble per pending action"
/// guarantee.
pub trait Ledger: Send + Sync {
    /// Record both keys and return `true` if neither has been seen.
    /// Return `false`, recording nothing, if either has.
    ///
    /// Implementations must make the check and the record one atomic step so
    /// overlapping notifications for the same action cannot both be admitted.
    fn admit(&self, key: &DedupKey) -> bool;
}

/// Callbacks a host invokes on the narration plugin.
///
/// Every method has a no-op default. None of them may fail or block the
/// host: anything fallible is handled inside.
#[async_trait]
pub trait HostHooks: Send + Sync {
    /// A lifecycle event from the host's event bus.
    async fn on_event(&self, _event: HostEvent) {}

    /// Chat parameters for the turn about to run.
    async fn on_chat_params(&self, _provider_id: Option<&str>) {}

    /// The system prompt for the turn about to run; entries may be appended.
    async fn on_system_transform(&self, _provider_id: Option<&str>, _system: &mut Vec<String>) {}

    /// A tool description about to be shown to the model.
    async fn on_tool_definition(&self, _description: &mut String) {}

    /// A tool has run. `output` is the text the model will see, if any.
    async fn on_tool_executed(
        &self,
        _tool: &str,
        _args: &serde_json::Value,
        _output: &mut Option<String>,
    ) {
    }
}
