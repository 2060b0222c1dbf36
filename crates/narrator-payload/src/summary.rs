//! Compact summaries of pending tool calls.
//!
//! Patch payloads are reduced to their file list and size, which costs one
//! pass over the patch text. Every other payload is passed through verbatim;
//! bounding happens later, when the summary is rendered into the prompt.

use serde::{Deserialize, Serialize};

use narrator_contracts::action::ToolPayload;

use crate::patch::extract_affected_files;

/// The default name of the multi-file patch tool.
pub const PATCH_TOOL: &str = "apply_patch";

/// Size of a patch document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchMetrics {
    /// Characters in the raw patch text; 0 when absent.
    pub chars: usize,
    /// Newline-separated segments; 0 when absent, at least 1 otherwise.
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSummary {
    pub files: Vec<String>,
    pub patch: PatchMetrics,
}

/// What the prompt shows about the pending call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadSummary {
    Patch { tool: String, summary: PatchSummary },
    Passthrough { tool: String, input: serde_json::Value },
}

impl PayloadSummary {
    pub fn tool(&self) -> &str {
        match self {
            PayloadSummary::Patch { tool, .. } | PayloadSummary::Passthrough { tool, .. } => tool,
        }
    }
}

/// Summarize `payload`, treating `patch_tool` as the multi-file patch tool.
pub fn summarize(payload: &ToolPayload, patch_tool: &str) -> PayloadSummary {
    if payload.tool != patch_tool {
        return PayloadSummary::Passthrough {
            tool: payload.tool.clone(),
            input: payload.input.clone(),
        };
    }

    let patch_text = payload
        .input
        .get("patchText")
        .and_then(serde_json::Value::as_str);

    let patch = match patch_text {
        Some(text) => PatchMetrics {
            chars: text.chars().count(),
            lines: text.split('\n').count(),
        },
        None => PatchMetrics { chars: 0, lines: 0 },
    };

    PayloadSummary::Patch {
        tool: payload.tool.clone(),
        summary: PatchSummary {
            files: extract_affected_files(patch_text),
            patch,
        },
    }
}
