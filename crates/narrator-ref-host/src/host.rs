//! An in-memory stand-in for the agent host.
//!
//! `InMemoryHost` serves transcripts, accepts generation requests, and shows
//! toasts, recording everything it is asked to do. Each collaborator call can
//! be made to fail independently. Clones share state, so one handle can be
//! boxed into the orchestrator three times while the caller keeps another
//! for inspection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use narrator_contracts::{
    error::{NarratorError, NarratorResult},
    message::ConversationMessage,
    request::{PreambleRequest, Toast},
};
use narrator_core::traits::{GenerationClient, MessageSource, Notifier};

/// Which collaborator calls should fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Failures {
    pub message: bool,
    pub history: bool,
    pub submit: bool,
    pub toast: bool,
}

#[derive(Default)]
struct HostState {
    /// Transcripts per session, oldest message first.
    sessions: HashMap<String, Vec<ConversationMessage>>,
    submissions: Vec<PreambleRequest>,
    toasts: Vec<Toast>,
    failures: Failures,
}

#[derive(Clone, Default)]
pub struct InMemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the transcript of `session_id`.
    pub fn with_session(self, session_id: impl Into<String>, messages: Vec<ConversationMessage>) -> Self {
        self.lock().sessions.insert(session_id.into(), messages);
        self
    }

    pub fn with_failures(self, failures: Failures) -> Self {
        self.lock().failures = failures;
        self
    }

    pub fn submissions(&self) -> Vec<PreambleRequest> {
        self.lock().submissions.clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }
}

#[async_trait]
impl MessageSource for InMemoryHost {
    async fn message(&self, session_id: &str, message_id: &str) -> NarratorResult<ConversationMessage> {
        let state = self.lock();
        let fail = |reason: &str| NarratorError::MessageFetch {
            session_id: session_id.to_string(),
            message_id: message_id.to_string(),
            reason: reason.to_string(),
        };

        if state.failures.message {
            return Err(fail("host unavailable"));
        }

        state
            .sessions
            .get(session_id)
            .and_then(|messages| messages.iter().find(|m| m.info.id == message_id))
            .cloned()
            .ok_or_else(|| fail("no such message"))
    }

    async fn messages(&self, session_id: &str, limit: usize) -> NarratorResult<Vec<ConversationMessage>> {
        let state = self.lock();
        let fail = |reason: &str| NarratorError::HistoryFetch {
            session_id: session_id.to_string(),
            reason: reason.to_string(),
        };

        if state.failures.history {
            return Err(fail("host unavailable"));
        }

        let messages = state.sessions.get(session_id).ok_or_else(|| fail("no such session"))?;
        let skip = messages.len().saturating_sub(limit);
        Ok(messages[skip..].to_vec())
    }
}

#[async_trait]
impl GenerationClient for InMemoryHost {
    async fn submit(&self, request: &PreambleRequest) -> NarratorResult<()> {
        let mut state = self.lock();
        if state.failures.submit {
            return Err(NarratorError::Dispatch {
                reason: format!("profile '{}' rejected the request", request.profile),
            });
        }
        debug!(
            session_id = %request.session_id,
            message_id = %request.message_id,
            prompt_chars = request.prompt().chars().count(),
            "preamble request accepted"
        );
        state.submissions.push(request.clone());
        Ok(())
    }
}

#[async_trait]
impl Notifier for InMemoryHost {
    async fn show_toast(&self, toast: &Toast) -> NarratorResult<()> {
        let mut state = self.lock();
        if state.failures.toast {
            return Err(NarratorError::Notification {
                reason: "no interactive client attached".to_string(),
            });
        }
        state.toasts.push(toast.clone());
        Ok(())
    }
}
