//! Context assembly: what the assistant said, what it is about to do, and
//! what the user last asked.
//!
//! Two independent fetches with different failure policies:
//!
//! - the anchor message (the one proposing the action) is required, and a
//!   failure aborts the pipeline for that action;
//! - the history window is optional, and a failure degrades to an empty
//!   "last user message".

use tracing::{debug, warn};

use narrator_contracts::{
    action::{PendingAction, ToolPayload},
    error::NarratorResult,
    message::{ConversationMessage, Role},
};

use crate::traits::MessageSource;

/// What the anchor message tells us about the pending action.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorContext {
    /// The message's text parts, joined and trimmed.
    pub assistant_text: String,
    /// The pending call's tool and arguments, or the `unknown` fallback.
    pub payload: ToolPayload,
}

/// Fetch the anchor message and extract its narration and tool call.
pub async fn load_anchor(
    source: &dyn MessageSource,
    action: &PendingAction,
) -> NarratorResult<AnchorContext> {
    let message = source.message(&action.session_id, &action.message_id).await?;

    let payload = action
        .call_id
        .as_deref()
        .and_then(|call_id| message.tool_call(call_id))
        .unwrap_or_else(|| {
            debug!(
                message_id = %action.message_id,
                call_id = ?action.call_id,
                "tool part not found on anchor message, using generic payload"
            );
            ToolPayload::unknown()
        });

    Ok(AnchorContext {
        assistant_text: message.text(),
        payload,
    })
}

/// The most recent non-empty user message before the anchor, or an empty
/// string if there is none or the history cannot be fetched.
pub async fn last_user_text(
    source: &dyn MessageSource,
    action: &PendingAction,
    window: usize,
) -> String {
    match source.messages(&action.session_id, window).await {
        Ok(history) => find_last_user_text(&history, &action.message_id).unwrap_or_default(),
        Err(e) => {
            warn!(
                session_id = %action.session_id,
                error = %e,
                "history fetch failed, continuing without user context"
            );
            String::new()
        }
    }
}

/// Scan `history` (oldest first) backwards from just before `anchor_id`.
///
/// If the anchor is not in the window the scan starts from the end, which
/// may pick a user message newer than the anchor.
pub fn find_last_user_text(history: &[ConversationMessage], anchor_id: &str) -> Option<String> {
    let start = history
        .iter()
        .position(|m| m.info.id == anchor_id)
        .unwrap_or(history.len());

    history[..start]
        .iter()
        .rev()
        .filter(|m| m.info.role == Role::User)
        .map(ConversationMessage::text)
        .find(|text| !text.is_empty())
}
