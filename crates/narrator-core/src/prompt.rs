//! Preamble prompt composition.
//!
//! The prompt is fixed scaffolding plus up to three bounded context sections:
//! the assistant's own (too short) text, the user's latest message, and the
//! payload summary. The summary is always present; the other two only when
//! non-empty.

use std::fmt::Write;

use narrator_config::PromptLimits;
use narrator_contracts::action::ActionKind;
use narrator_payload::{render_bounded, truncate, PayloadSummary};

/// Builds prompts within the configured section limits.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    limits: PromptLimits,
}

impl PromptComposer {
    pub fn new(limits: PromptLimits) -> Self {
        Self { limits }
    }

    pub fn compose(
        &self,
        kind: ActionKind,
        assistant_text: &str,
        last_user_text: &str,
        summary: &PayloadSummary,
    ) -> String {
        let noun = kind.noun();
        let (pending, intended) = match kind {
            ActionKind::Shell => ("command", "command"),
            ActionKind::Edit => ("file change", "change"),
        };

        let mut prompt = String::new();

        // `write!` into a String cannot fail.
        let _ = writeln!(
            prompt,
            "You are generating a short assistant message that will be shown to the user BEFORE they approve a {noun}."
        );
        prompt.push_str("The original assistant message may have been missing (or too short on) explanation.\n\n");
        prompt.push_str("Do BOTH of these in the same message:\n");
        prompt.push_str("1) Answer the user's latest question (if there is one).\n");
        let _ = writeln!(
            prompt,
            "2) Explain what the pending {pending} will do and why, in plain language.\n"
        );
        prompt.push_str("Constraints:\n");
        prompt.push_str("- Do NOT call tools and do NOT ask the user to run commands.\n");
        let _ = writeln!(
            prompt,
            "- If you cannot fully answer yet, say what info is missing, but still explain the intended {intended}."
        );
        if kind == ActionKind::Edit {
            prompt.push_str("- Mention affected files if obvious.\n");
        }
        prompt.push_str("- Keep it concise (max ~12 lines).\n\n");

        if !assistant_text.is_empty() {
            let _ = write!(
                prompt,
                "Assistant already wrote (may be too short):\n{}\n\n",
                truncate(assistant_text, self.limits.assistant_text_chars)
            );
        }

        if !last_user_text.is_empty() {
            let _ = write!(
                prompt,
                "User's latest message:\n{}\n\n",
                truncate(last_user_text, self.limits.user_text_chars)
            );
        }

        prompt.push_str("Pending tool call (JSON, may be truncated):\n");
        prompt.push_str(&render_bounded(summary, self.limits.payload_chars));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use narrator_payload::summary::{PatchMetrics, PatchSummary};

    use super::*;

    fn bash_summary() -> PayloadSummary {
        PayloadSummary::Passthrough {
            tool: "bash".to_string(),
            input: json!({ "command": "rm -rf /tmp/x" }),
        }
    }

    fn patch_summary() -> PayloadSummary {
        PayloadSummary::Patch {
            tool: "apply_patch".to_string(),
            summary: PatchSummary {
                files: vec!["src/lib.rs".to_string()],
                patch: PatchMetrics { chars: 120, lines: 6 },
            },
        }
    }

    #[test]
    fn test_shell_prompt_frames_a_command() {
        let prompt = PromptComposer::default().compose(ActionKind::Shell, "", "", &bash_summary());
        assert!(prompt.starts_with(
            "You are generating a short assistant message that will be shown to the user BEFORE they approve a shell command.\n"
        ));
        assert!(prompt.contains("2) Explain what the pending command will do and why"));
        assert!(prompt.contains("still explain the intended command."));
        assert!(!prompt.contains("Mention affected files"));
        assert!(prompt.contains("\"command\": \"rm -rf /tmp/x\""));
    }

    #[test]
    fn test_edit_prompt_mentions_files() {
        let prompt = PromptComposer::default().compose(ActionKind::Edit, "", "", &patch_summary());
        assert!(prompt.contains("BEFORE they approve a file change."));
        assert!(prompt.contains("2) Explain what the pending file change will do and why"));
        assert!(prompt.contains("still explain the intended change."));
        assert!(prompt.contains("- Mention affected files if obvious.\n"));
        assert!(prompt.contains("\"src/lib.rs\""));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let prompt = PromptComposer::default().compose(ActionKind::Shell, "", "", &bash_summary());
        assert!(!prompt.contains("Assistant already wrote"));
        assert!(!prompt.contains("User's latest message"));
        assert!(prompt.contains("Pending tool call (JSON, may be truncated):\n{"));
    }

    #[test]
    fn test_sections_appear_in_order() {
        let prompt = PromptComposer::default().compose(
            ActionKind::Shell,
            "Cleaning up.",
            "delete the temp directory",
            &bash_summary(),
        );
        let assistant = prompt.find("Assistant already wrote (may be too short):\nCleaning up.\n\n").unwrap();
        let user = prompt.find("User's latest message:\ndelete the temp directory\n\n").unwrap();
        let payload = prompt.find("Pending tool call").unwrap();
        assert!(assistant < user && user < payload);
    }

    #[test]
    fn test_sections_are_bounded() {
        let composer = PromptComposer::new(PromptLimits {
            assistant_text_chars: 10,
            user_text_chars: 20,
            payload_chars: 30,
        });
        let prompt = composer.compose(
            ActionKind::Shell,
            &"a".repeat(50),
            &"u".repeat(50),
            &bash_summary(),
        );
        assert!(prompt.contains(&format!("{}\n…(truncated, 40 chars omitted)", "a".repeat(10))));
        assert!(prompt.contains(&format!("{}\n…(truncated, 30 chars omitted)", "u".repeat(20))));
        assert!(!prompt.contains(&"a".repeat(11)));
        assert!(prompt.ends_with("chars omitted)"));
    }
}
