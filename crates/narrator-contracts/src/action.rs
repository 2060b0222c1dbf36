//! Pending action identity and payload types.
//!
//! A `PendingAction` is read-only to this workspace: the host's approval
//! subsystem creates it, we only observe it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kinds of gated action that can trigger a preamble.
///
/// The host calls shell commands `bash` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    #[serde(rename = "bash")]
    Shell,
}

impl ActionKind {
    /// Map a wire permission type onto a gated kind, if it is one.
    pub fn from_wire(kind: &str) -> Option<Self> {
        match kind {
            "edit" => Some(ActionKind::Edit),
            "bash" => Some(ActionKind::Shell),
            _ => None,
        }
    }

    /// What the user is about to approve, in prompt wording.
    pub fn noun(&self) -> &'static str {
        match self {
            ActionKind::Edit => "file change",
            ActionKind::Shell => "shell command",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Edit => f.write_str("edit"),
            ActionKind::Shell => f.write_str("shell"),
        }
    }
}

/// One agent-initiated action awaiting human approval.
///
/// `(session_id, message_id, call_id)` identifies the logical action even when
/// the host notifies about it several times under different `action_id`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub action_id: String,
    pub session_id: String,
    /// The assistant message that proposed the action.
    pub message_id: String,
    /// The tool invocation within that message, when the host knows it.
    pub call_id: Option<String>,
    pub kind: ActionKind,
}

impl PendingAction {
    /// `session:message:call`, with an empty call segment when absent.
    pub fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.session_id,
            self.message_id,
            self.call_id.as_deref().unwrap_or("")
        )
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            action_id: self.action_id.clone(),
            composite: self.composite_key(),
        }
    }
}

/// Both identities under which a pending action may be re-announced.
///
/// The ledger treats the action as seen if EITHER key has been recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DedupKey {
    pub action_id: String,
    pub composite: String,
}

/// The tool name and raw arguments of the pending call.
///
/// Falls back to `unknown` with an empty object when the tool part cannot be
/// found on the anchor message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPayload {
    pub tool: String,
    pub input: serde_json::Value,
}

impl ToolPayload {
    pub const UNKNOWN_TOOL: &'static str = "unknown";

    pub fn unknown() -> Self {
        Self {
            tool: Self::UNKNOWN_TOOL.to_string(),
            input: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

impl Default for ToolPayload {
    fn default() -> Self {
        Self::unknown()
    }
}
