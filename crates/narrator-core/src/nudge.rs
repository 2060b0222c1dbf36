//! Narration nudges for models that tend to act without explaining.
//!
//! Three nudges, all scoped to the configured provider list:
//!
//! 1. a system-prompt block asking the model to narrate and to offer choices;
//! 2. a hint prefixed to every tool description;
//! 3. a bracketed one-line summary appended to each tool's output.
//!
//! Hooks for tool definitions and tool results carry no provider, so the
//! provider from the most recent chat turn is remembered here.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::debug;

use narrator_config::NudgeSettings;
use narrator_payload::extract_affected_files;

/// Appended to the system prompt for nudged providers.
pub const NARRATION_SYSTEM_PROMPT: &str = "\
# Communication style

Always narrate your thought process as you work. In the same response,
include a short explanation of what you are about to do and why alongside
each tool call. Between consecutive tool calls, briefly summarize what
you learned and what you plan to do next. Every response that includes
tool calls should also include interleaved text explaining them.

# Offering choices

When a user's request is ambiguous or there are multiple reasonable
approaches, present the options as a short numbered list and ask which
they prefer before proceeding. If one option is clearly best, recommend
it but still let the user decide. Only skip this when the task is
completely unambiguous.

# Explaining edits

In the same response as the tool call, explain in plain language:
(a) what you intend to change, (b) which files are affected, and
(c) why this change addresses the user's request.";

/// Prefixed to tool descriptions for nudged providers.
pub const TOOL_HINT: &str = "IMPORTANT: In the same response, write a short explanation of what \
                             you are about to do and why, then call this tool.\n\n";

/// Provider-scoped narration nudges.
#[derive(Debug)]
pub struct Nudges {
    settings: NudgeSettings,
    patch_tool: String,
    current_provider: Mutex<String>,
}

impl Nudges {
    pub fn new(settings: NudgeSettings, patch_tool: impl Into<String>) -> Self {
        Self {
            settings,
            patch_tool: patch_tool.into(),
            current_provider: Mutex::new(String::new()),
        }
    }

    /// The provider of the most recent chat turn, or empty if none yet.
    pub fn current_provider(&self) -> String {
        self.current_provider
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remember the provider for the turn about to run.
    pub fn track_provider(&self, provider_id: Option<&str>) {
        let provider = provider_id.unwrap_or_default().to_string();
        debug!(provider = %provider, "tracking chat provider");
        *self
            .current_provider
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = provider;
    }

    fn active(&self) -> bool {
        self.settings.applies_to(&self.current_provider())
    }

    /// Track the provider and append the narration block if it is nudged.
    pub fn transform_system(&self, provider_id: Option<&str>, system: &mut Vec<String>) {
        self.track_provider(provider_id);
        if self.active() {
            system.push(NARRATION_SYSTEM_PROMPT.to_string());
        }
    }

    /// Prefix `description` with `TOOL_HINT` unless it is empty or already
    /// starts with an `IMPORTANT:` notice.
    pub fn annotate_tool(&self, description: &mut String) {
        if !self.active() || description.is_empty() || description.starts_with("IMPORTANT:") {
            return;
        }
        description.insert_str(0, TOOL_HINT);
    }

    /// Append a bracketed summary of the call to `output`, if there is both
    /// an output and a summary for this tool.
    pub fn summarize_tool_result(&self, tool: &str, args: &Value, output: &mut Option<String>) {
        if !self.active() {
            return;
        }
        let (Some(text), Some(summary)) = (output.as_mut(), tool_result_summary(tool, args, &self.patch_tool))
        else {
            return;
        };
        text.push_str("\n\n");
        text.push_str(&summary);
    }
}

/// One-line description of a finished tool call, for the tools that have one.
pub fn tool_result_summary(tool: &str, args: &Value, patch_tool: &str) -> Option<String> {
    let arg = |key: &str| args.get(key).and_then(Value::as_str);
    let file = || arg("filePath").or_else(|| arg("path")).unwrap_or("unknown file");
    let clip = |value: &str, max: usize| value.chars().take(max).collect::<String>();

    let summary = match tool {
        "read" => format!("[Read {}]", file()),
        "glob" => format!("[Searched for files matching: {}]", arg("pattern").unwrap_or("?")),
        "grep" => format!("[Searched file contents for: {}]", arg("pattern").unwrap_or("?")),
        "bash" => format!(
            "[Ran command: {}]",
            arg("command").map_or_else(|| "?".to_string(), |cmd| clip(cmd, 120))
        ),
        "edit" => format!("[Edited {}]", file()),
        "write" => format!("[Wrote {}]", file()),
        "webfetch" => format!("[Fetched: {}]", arg("url").unwrap_or("?")),
        "task" => format!("[Ran sub-task: {}]", clip(arg("description").unwrap_or_default(), 80)),
        t if t == patch_tool => {
            let files = extract_affected_files(arg("patchText"));
            if files.is_empty() {
                "[Applied patch]".to_string()
            } else {
                format!("[Applied patch to: {}]", files.join(", "))
            }
        }
        _ => return None,
    };
    Some(summary)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn nudges() -> Nudges {
        Nudges::new(NudgeSettings::default(), "apply_patch")
    }

    // ── Provider tracking ────────────────────────────────────────────────────

    #[test]
    fn test_provider_is_remembered_and_overwritten() {
        let n = nudges();
        assert_eq!(n.current_provider(), "");
        n.track_provider(Some("openai"));
        assert_eq!(n.current_provider(), "openai");
        n.track_provider(None);
        assert_eq!(n.current_provider(), "");
    }

    // ── System prompt ────────────────────────────────────────────────────────

    #[test]
    fn test_system_block_only_for_nudged_providers() {
        let n = nudges();

        let mut system = vec!["base".to_string()];
        n.transform_system(Some("anthropic"), &mut system);
        assert_eq!(system.len(), 1);

        n.transform_system(Some("google"), &mut system);
        assert_eq!(system.len(), 2);
        assert!(system[1].starts_with("# Communication style"));
        assert_eq!(n.current_provider(), "google");
    }

    // ── Tool hints ───────────────────────────────────────────────────────────

    #[test]
    fn test_tool_hint_is_prefixed_once() {
        let n = nudges();
        n.track_provider(Some("xai"));

        let mut description = "Run a shell command.".to_string();
        n.annotate_tool(&mut description);
        assert!(description.starts_with("IMPORTANT: In the same response"));
        assert!(description.ends_with("then call this tool.\n\nRun a shell command."));

        let annotated = description.clone();
        n.annotate_tool(&mut description);
        assert_eq!(description, annotated);
    }

    #[test]
    fn test_tool_hint_skips_empty_and_unnudged() {
        let n = nudges();
        n.track_provider(Some("xai"));
        let mut empty = String::new();
        n.annotate_tool(&mut empty);
        assert!(empty.is_empty());

        n.track_provider(Some("anthropic"));
        let mut description = "Read a file.".to_string();
        n.annotate_tool(&mut description);
        assert_eq!(description, "Read a file.");
    }

    // ── Post-tool summaries ──────────────────────────────────────────────────

    #[test]
    fn test_summaries_per_tool() {
        let cases = [
            ("read", json!({ "filePath": "a.rs" }), "[Read a.rs]"),
            ("read", json!({ "path": "b.rs" }), "[Read b.rs]"),
            ("read", json!({}), "[Read unknown file]"),
            ("glob", json!({ "pattern": "**/*.rs" }), "[Searched for files matching: **/*.rs]"),
            ("grep", json!({}), "[Searched file contents for: ?]"),
            ("bash", json!({ "command": "cargo fmt" }), "[Ran command: cargo fmt]"),
            ("bash", json!({ "command": 3 }), "[Ran command: ?]"),
            ("edit", json!({ "filePath": "c.rs" }), "[Edited c.rs]"),
            ("write", json!({ "path": "d.rs" }), "[Wrote d.rs]"),
            ("webfetch", json!({ "url": "https://example.com" }), "[Fetched: https://example.com]"),
            ("task", json!({}), "[Ran sub-task: ]"),
            (
                "apply_patch",
                json!({ "patchText": "*** Add File: x.rs\n*** Delete File: y.rs" }),
                "[Applied patch to: x.rs, y.rs]",
            ),
            ("apply_patch", json!({}), "[Applied patch]"),
        ];
        for (tool, args, expected) in cases {
            assert_eq!(
                tool_result_summary(tool, &args, "apply_patch").as_deref(),
                Some(expected),
                "tool {tool}"
            );
        }
        assert_eq!(tool_result_summary("todowrite", &json!({}), "apply_patch"), None);
    }

    #[test]
    fn test_long_command_and_description_are_clipped() {
        let command = "c".repeat(200);
        let summary = tool_result_summary("bash", &json!({ "command": command }), "apply_patch").unwrap();
        assert_eq!(summary, format!("[Ran command: {}]", "c".repeat(120)));

        let description = "d".repeat(100);
        let summary = tool_result_summary("task", &json!({ "description": description }), "apply_patch").unwrap();
        assert_eq!(summary, format!("[Ran sub-task: {}]", "d".repeat(80)));
    }

    #[test]
    fn test_summary_is_appended_to_present_output() {
        let n = nudges();
        n.track_provider(Some("openai"));

        let mut output = Some("file contents".to_string());
        n.summarize_tool_result("read", &json!({ "filePath": "a.rs" }), &mut output);
        assert_eq!(output.as_deref(), Some("file contents\n\n[Read a.rs]"));

        let mut absent = None;
        n.summarize_tool_result("read", &json!({ "filePath": "a.rs" }), &mut absent);
        assert_eq!(absent, None);
    }

    #[test]
    fn test_summary_skipped_for_unnudged_provider() {
        let n = nudges();
        n.track_provider(Some("anthropic"));
        let mut output = Some("ok".to_string());
        n.summarize_tool_result("bash", &json!({ "command": "ls" }), &mut output);
        assert_eq!(output.as_deref(), Some("ok"));
    }
}
