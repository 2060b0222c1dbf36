//! Outbound artifacts: the generation request and toast notifications.

use serde::{Deserialize, Serialize};

/// A single prompt part on the wire. Only text parts are ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptPart {
    Text { text: String },
}

/// The synthesized preamble generation request.
///
/// Submitted once and never tracked afterwards. The ledger entry is the only
/// durable trace that it existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreambleRequest {
    #[serde(rename = "sessionID")]
    pub session_id: String,
    /// The tool-calling message the preamble is threaded off.
    #[serde(rename = "messageID")]
    pub message_id: String,
    /// Generation profile that handles the request, distinct from the main agent.
    #[serde(rename = "agent")]
    pub profile: String,
    pub parts: Vec<PromptPart>,
}

impl PreambleRequest {
    pub fn new(
        session_id: impl Into<String>,
        message_id: impl Into<String>,
        profile: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            message_id: message_id.into(),
            profile: profile.into(),
            parts: vec![PromptPart::Text { text: prompt.into() }],
        }
    }

    /// The prompt text carried by this request.
    pub fn prompt(&self) -> &str {
        match self.parts.first() {
            Some(PromptPart::Text { text }) => text,
            None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A transient UI notification. Best effort: failures are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
    /// Display time in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
}
