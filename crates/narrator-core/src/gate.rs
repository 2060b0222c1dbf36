//! The sufficiency gate: did the assistant already explain this action?
//!
//! Narration is judged on the assistant's own text for the tool-calling
//! message. Any non-empty text suffices, except that multi-file patches and
//! shell commands each have a minimum length below which the text counts as
//! insufficient.

use serde::{Deserialize, Serialize};

use narrator_config::Thresholds;
use narrator_contracts::action::ActionKind;

/// The gate's verdict on existing narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "narration", rename_all = "snake_case")]
pub enum Narration {
    /// The assistant wrote nothing.
    Absent,
    /// The assistant wrote something, but less than the action calls for.
    Insufficient { chars: usize, required: usize },
    Sufficient,
}

impl Narration {
    /// Whether a preamble should be generated.
    pub fn needs_preamble(&self) -> bool {
        !matches!(self, Narration::Sufficient)
    }
}

/// Length thresholds keyed by action kind and tool.
#[derive(Debug, Clone)]
pub struct SufficiencyGate {
    thresholds: Thresholds,
    patch_tool: String,
}

impl SufficiencyGate {
    pub fn new(thresholds: Thresholds, patch_tool: impl Into<String>) -> Self {
        Self {
            thresholds,
            patch_tool: patch_tool.into(),
        }
    }

    /// Classify `assistant_text` for an action of `kind` calling `tool`.
    ///
    /// Length is measured in characters after trimming.
    pub fn assess(&self, kind: ActionKind, tool: &str, assistant_text: &str) -> Narration {
        let chars = assistant_text.trim().chars().count();
        if chars == 0 {
            return Narration::Absent;
        }

        let required = [
            (tool == self.patch_tool).then_some(self.thresholds.patch_min_chars),
            (kind == ActionKind::Shell).then_some(self.thresholds.shell_min_chars),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);

        if chars < required {
            Narration::Insufficient { chars, required }
        } else {
            Narration::Sufficient
        }
    }
}

impl Default for SufficiencyGate {
    fn default() -> Self {
        Self::new(Thresholds::default(), narrator_payload::PATCH_TOOL)
    }
}
