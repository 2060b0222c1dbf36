//! Canned sessions and permission events for the reference scenarios.
//!
//! All content is fictional. Each transcript ends with the assistant message
//! that proposes the gated action, followed in some cases by later traffic.

use serde_json::{json, Value};

use narrator_contracts::{
    event::{Event, HostEvent},
    message::{ConversationMessage, Part, Role},
};

pub const SESSION_ID: &str = "ses_ref_01";

/// The assistant message that proposes the action in every transcript.
pub const ANCHOR_ID: &str = "msg_ref_anchor";

pub const CALL_ID: &str = "call_ref_01";

fn user(id: &str, text: &str) -> ConversationMessage {
    ConversationMessage::new(id, Role::User, vec![Part::text(text)])
}

fn anchor(narration: &str, tool: &str, input: Value) -> ConversationMessage {
    ConversationMessage::new(
        ANCHOR_ID,
        Role::Assistant,
        vec![
            Part::text(narration),
            Part::tool(CALL_ID, tool, input),
        ],
    )
}

/// A shell command with no narration at all.
pub fn unnarrated_shell() -> Vec<ConversationMessage> {
    vec![
        user("msg_ref_01", "the build keeps picking up stale files"),
        ConversationMessage::new(
            "msg_ref_02",
            Role::Assistant,
            vec![Part::text("Let me look at the build output.")],
        ),
        user("msg_ref_03", "delete the temp directory"),
        anchor("", "bash", json!({ "command": "rm -rf /tmp/x", "description": "Remove temp dir" })),
    ]
}

/// A multi-file patch explained in one short sentence.
pub fn terse_patch() -> Vec<ConversationMessage> {
    let patch = "*** Begin Patch\n\
                 *** Update File: src/config.rs\n\
                 @@ fn load()\n\
                 -    let path = \"config.toml\";\n\
                 +    let path = env_path().unwrap_or(\"config.toml\");\n\
                 *** Add File: src/env.rs\n\
                 +pub fn env_path() -> Option<&'static str> { None }\n\
                 *** End Patch";
    vec![
        user("msg_ref_01", "can the config path come from the environment?"),
        anchor("Updating config loading.", "apply_patch", json!({ "patchText": patch })),
    ]
}

/// A single-file edit the assistant already explained.
pub fn narrated_edit() -> Vec<ConversationMessage> {
    vec![
        user("msg_ref_01", "fix the typo in the README heading"),
        anchor(
            "The heading says \"Instalation\"; I'll correct it to \"Installation\".",
            "edit",
            json!({ "filePath": "README.md", "oldString": "Instalation", "newString": "Installation" }),
        ),
    ]
}

/// A bare `permission.updated` event for the anchor call.
pub fn permission_event(id: &str, kind: &str) -> HostEvent {
    HostEvent::Bare(Event {
        kind: "permission.updated".to_string(),
        properties: notice(id, kind),
    })
}

/// The same notice wrapped in a global envelope, as `permission.asked`.
pub fn enveloped_permission_event(id: &str, kind: &str) -> HostEvent {
    HostEvent::Envelope {
        directory: Some("/work/ref-project".to_string()),
        payload: Event {
            kind: "permission.asked".to_string(),
            properties: json!({ "info": notice(id, kind) }),
        },
    }
}

fn notice(id: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "sessionID": SESSION_ID,
        "messageID": ANCHOR_ID,
        "callID": CALL_ID,
        "type": kind
    })
}
