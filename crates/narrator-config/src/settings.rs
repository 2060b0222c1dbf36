//! Configuration schema.
//!
//! Every field has a default, so an empty TOML document is a complete
//! configuration. Sections mirror the pipeline stage they tune.
//!
//! Example:
//! ```toml
//! profile = "narration"
//!
//! [thresholds]
//! patch_min_chars = 150
//!
//! [nudge]
//! providers = ["openai"]
//! ```

use serde::{Deserialize, Serialize};

use narrator_contracts::request::ToastVariant;

/// Minimum assistant narration, in characters, below which a preamble is
/// generated even though some text exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Applies when the pending tool is the multi-file patch tool.
    pub patch_min_chars: usize,
    /// Applies to every shell command.
    pub shell_min_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            patch_min_chars: 120,
            shell_min_chars: 80,
        }
    }
}

/// Per-section character bounds for the generated prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptLimits {
    pub assistant_text_chars: usize,
    pub user_text_chars: usize,
    pub payload_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            assistant_text_chars: 800,
            user_text_chars: 2000,
            payload_chars: 8000,
        }
    }
}

/// Wording and presentation of the toasts shown around a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    pub title: String,
    pub variant: ToastVariant,
    pub duration_ms: u64,
    /// Shown just before the generation request is submitted.
    pub generating: String,
    /// Shown when submission fails.
    pub failed: String,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            title: "Narration".to_string(),
            variant: ToastVariant::Info,
            duration_ms: 6000,
            generating: "Generating an explanation for the pending edit...".to_string(),
            failed: "Could not generate explanation (plugin error).".to_string(),
        }
    }
}

/// Providers whose models tend not to narrate, and therefore get the
/// system-prompt block, tool hints and post-tool summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeSettings {
    pub providers: Vec<String>,
}

impl Default for NudgeSettings {
    fn default() -> Self {
        Self {
            providers: vec!["openai".to_string(), "google".to_string(), "xai".to_string()],
        }
    }
}

impl NudgeSettings {
    pub fn applies_to(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }
}

/// The top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Generation profile that receives preamble requests.
    pub profile: String,
    /// Name of the multi-file patch tool.
    pub patch_tool: String,
    /// How many recent transcript entries to search for the last user message.
    pub history_window: usize,
    pub thresholds: Thresholds,
    pub limits: PromptLimits,
    pub toast: ToastSettings,
    pub nudge: NudgeSettings,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            profile: "narration".to_string(),
            patch_tool: "apply_patch".to_string(),
            history_window: 50,
            thresholds: Thresholds::default(),
            limits: PromptLimits::default(),
            toast: ToastSettings::default(),
            nudge: NudgeSettings::default(),
        }
    }
}
