//! Conversation transcript types, as returned by the host's message query API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::action::ToolPayload;

/// Who authored a message. Roles this workspace does not care about collapse
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: String,
    pub role: Role,
}

/// Execution state of a tool part. Only the arguments matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    #[serde(default)]
    pub input: serde_json::Value,
}

/// One ordered piece of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    /// `text` is `None` when the host sent a missing or non-string value.
    Text {
        #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Tool {
        #[serde(rename = "callID")]
        call_id: String,
        tool: String,
        #[serde(default)]
        state: ToolState,
    },
    /// Reasoning, step markers, files and anything else the host emits.
    #[serde(other)]
    Other,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: Some(text.into()),
        }
    }

    pub fn tool(call_id: impl Into<String>, tool: impl Into<String>, input: serde_json::Value) -> Self {
        Part::Tool {
            call_id: call_id.into(),
            tool: tool.into(),
            state: ToolState { input },
        }
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub info: MessageInfo,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl ConversationMessage {
    pub fn new(id: impl Into<String>, role: Role, parts: Vec<Part>) -> Self {
        Self {
            info: MessageInfo { id: id.into(), role },
            parts,
        }
    }

    /// All text parts joined by newlines, trimmed.
    pub fn text(&self) -> String {
        joined_text(&self.parts)
    }

    /// The arguments of the tool part whose call id equals `call_id`.
    pub fn tool_call(&self, call_id: &str) -> Option<ToolPayload> {
        find_tool_call(&self.parts, call_id)
    }
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Concatenate the string text parts of `parts` with newlines and trim the result.
pub fn joined_text(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text: Some(text) } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

pub fn find_tool_call(parts: &[Part], call_id: &str) -> Option<ToolPayload> {
    parts.iter().find_map(|part| match part {
        Part::Tool {
            call_id: id,
            tool,
            state,
        } if id == call_id => Some(ToolPayload {
            tool: tool.clone(),
            input: match &state.input {
                serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
                input => input.clone(),
            },
        }),
        _ => None,
    })
}
