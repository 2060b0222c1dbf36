//! The preamble orchestrator: one pending action in, at most one generation
//! request out.
//!
//! Pipeline per event:
//!
//!   Unwrap → Admit (ledger) → Anchor fetch → Gate → History → Summarize → Compose → Dispatch
//!
//! Nothing in here may interrupt the host's approval flow. Every fallible step
//! is isolated and turned into a `PreambleOutcome`; `handle` cannot fail.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use narrator_config::NarrationConfig;
use narrator_contracts::{
    action::PendingAction,
    event::HostEvent,
    outcome::{IgnoreReason, InvocationId, PreambleOutcome},
    request::{PreambleRequest, Toast},
};
use narrator_payload::summarize;

use crate::{
    context::{last_user_text, load_anchor},
    gate::SufficiencyGate,
    prompt::PromptComposer,
    traits::{GenerationClient, Ledger, MessageSource, Notifier},
};

/// Wires the host collaborators and the ledger into the preamble pipeline.
///
/// Construct one per host process; the ledger it holds is what makes
/// repeated notifications for the same action harmless.
pub struct Orchestrator {
    source: Box<dyn MessageSource>,
    generator: Box<dyn GenerationClient>,
    notifier: Box<dyn Notifier>,
    ledger: Box<dyn Ledger>,
    config: NarrationConfig,
    gate: SufficiencyGate,
    composer: PromptComposer,
}

impl Orchestrator {
    pub fn new(
        source: Box<dyn MessageSource>,
        generator: Box<dyn GenerationClient>,
        notifier: Box<dyn Notifier>,
        ledger: Box<dyn Ledger>,
        config: NarrationConfig,
    ) -> Self {
        let gate = SufficiencyGate::new(config.thresholds.clone(), config.patch_tool.clone());
        let composer = PromptComposer::new(config.limits.clone());
        Self {
            source,
            generator,
            notifier,
            ledger,
            config,
            gate,
            composer,
        }
    }

    pub fn config(&self) -> &NarrationConfig {
        &self.config
    }

    /// Run the pipeline on a background task and return immediately.
    ///
    /// The host may drop the handle; the outcome is only of interest to
    /// callers that want to observe it.
    pub fn observe(self: &Arc<Self>, event: HostEvent) -> JoinHandle<PreambleOutcome> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.handle(event).await })
    }

    /// Run the pipeline for one event to completion.
    pub async fn handle(&self, event: HostEvent) -> PreambleOutcome {
        let span = info_span!("preamble", invocation = %InvocationId::new());
        self.handle_inner(event).instrument(span).await
    }

    async fn handle_inner(&self, event: HostEvent) -> PreambleOutcome {
        // ── Unwrap the envelope and decode the notice ────────────────────────
        let event = event.into_event();
        let Some(notice) = event.permission_notice() else {
            debug!(event_type = %event.kind, "not a permission notice, ignoring");
            return PreambleOutcome::Ignored {
                reason: IgnoreReason::NotPermission,
            };
        };

        let action = match notice.into_pending() {
            Ok(action) => action,
            Err(rejection) => {
                debug!(rejection = ?rejection, "permission notice not eligible");
                return PreambleOutcome::Ignored {
                    reason: IgnoreReason::Notice(rejection),
                };
            }
        };

        // ── Admission ────────────────────────────────────────────────────────
        if !self.ledger.admit(&action.dedup_key()) {
            debug!(
                action_id = %action.action_id,
                composite = %action.composite_key(),
                "pending action already handled"
            );
            return PreambleOutcome::Duplicate;
        }

        // ── Anchor message ───────────────────────────────────────────────────
        let anchor = match load_anchor(self.source.as_ref(), &action).await {
            Ok(anchor) => anchor,
            Err(e) => {
                warn!(
                    session_id = %action.session_id,
                    message_id = %action.message_id,
                    error = %e,
                    "anchor message unavailable, skipping preamble"
                );
                return PreambleOutcome::AnchorUnavailable {
                    reason: e.to_string(),
                };
            }
        };

        // ── Sufficiency gate ─────────────────────────────────────────────────
        let narration = self
            .gate
            .assess(action.kind, &anchor.payload.tool, &anchor.assistant_text);
        if !narration.needs_preamble() {
            debug!(
                action_id = %action.action_id,
                tool = %anchor.payload.tool,
                "assistant narration sufficient"
            );
            return PreambleOutcome::NarrationSufficient;
        }

        // ── Context, summary, prompt ─────────────────────────────────────────
        let user_text = last_user_text(self.source.as_ref(), &action, self.config.history_window).await;
        let summary = summarize(&anchor.payload, &self.config.patch_tool);
        let prompt = self
            .composer
            .compose(action.kind, &anchor.assistant_text, &user_text, &summary);

        let request = PreambleRequest::new(
            action.session_id.clone(),
            action.message_id.clone(),
            self.config.profile.clone(),
            prompt,
        );

        info!(
            action_id = %action.action_id,
            session_id = %action.session_id,
            kind = %action.kind,
            tool = %summary.tool(),
            narration = ?narration,
            "dispatching preamble"
        );

        self.dispatch(&action, &request).await
    }

    /// Announce, submit, and report failure. Never propagates.
    async fn dispatch(&self, action: &PendingAction, request: &PreambleRequest) -> PreambleOutcome {
        self.toast(&self.config.toast.generating).await;

        match self.generator.submit(request).await {
            Ok(()) => PreambleOutcome::Dispatched,
            Err(e) => {
                warn!(
                    action_id = %action.action_id,
                    session_id = %action.session_id,
                    error = %e,
                    "preamble submission failed"
                );
                self.toast(&self.config.toast.failed).await;
                PreambleOutcome::DispatchFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn toast(&self, message: &str) {
        let settings = &self.config.toast;
        let toast = Toast {
            title: settings.title.clone(),
            message: message.to_string(),
            variant: settings.variant,
            duration_ms: settings.duration_ms,
        };
        if let Err(e) = self.notifier.show_toast(&toast).await {
            warn!(error = %e, "toast failed, ignoring");
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;

    use narrator_config::NarrationConfig;
    use narrator_contracts::{
        action::DedupKey,
        error::{NarratorError, NarratorResult},
        event::{HostEvent, NoticeRejection},
        message::{ConversationMessage, Part, Role},
        outcome::{IgnoreReason, PreambleOutcome},
        request::{PreambleRequest, Toast},
    };

    use crate::traits::{GenerationClient, Ledger, MessageSource, Notifier};

    use super::Orchestrator;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A transcript store that counts calls and can be told to fail.
    struct MockSource {
        history: Vec<ConversationMessage>,
        fail_message: bool,
        fail_history: bool,
        history_calls: Arc<Mutex<u32>>,
    }

    impl MockSource {
        fn new(history: Vec<ConversationMessage>) -> Self {
            Self {
                history,
                fail_message: false,
                fail_history: false,
                history_calls: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl MessageSource for MockSource {
        async fn message(&self, session_id: &str, message_id: &str) -> NarratorResult<ConversationMessage> {
            let missing = || NarratorError::MessageFetch {
                session_id: session_id.to_string(),
                message_id: message_id.to_string(),
                reason: "unavailable".to_string(),
            };
            if self.fail_message {
                return Err(missing());
            }
            self.history
                .iter()
                .find(|m| m.info.id == message_id)
                .cloned()
                .ok_or_else(missing)
        }

        async fn messages(&self, session_id: &str, _limit: usize) -> NarratorResult<Vec<ConversationMessage>> {
            *self.history_calls.lock().unwrap() += 1;
            if self.fail_history {
                return Err(NarratorError::HistoryFetch {
                    session_id: session_id.to_string(),
                    reason: "unavailable".to_string(),
                });
            }
            Ok(self.history.clone())
        }
    }

    /// A generation client that records every request.
    struct MockGenerator {
        requests: Arc<Mutex<Vec<PreambleRequest>>>,
        fail: bool,
    }

    impl MockGenerator {
        fn new() -> Self {
            Self {
                requests: Arc::new(Mutex::new(vec![])),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl GenerationClient for MockGenerator {
        async fn submit(&self, request: &PreambleRequest) -> NarratorResult<()> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(NarratorError::Dispatch {
                    reason: "agent not found".to_string(),
                });
            }
            Ok(())
        }
    }

    /// A notifier that records toasts and can be told to fail.
    struct MockNotifier {
        toasts: Arc<Mutex<Vec<Toast>>>,
        fail: bool,
    }

    impl MockNotifier {
        fn new() -> Self {
            Self {
                toasts: Arc::new(Mutex::new(vec![])),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn show_toast(&self, toast: &Toast) -> NarratorResult<()> {
            self.toasts.lock().unwrap().push(toast.clone());
            if self.fail {
                return Err(NarratorError::Notification {
                    reason: "no tui attached".to_string(),
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockLedger {
        seen: Mutex<HashSet<String>>,
    }

    impl Ledger for MockLedger {
        fn admit(&self, key: &DedupKey) -> bool {
            let mut seen = self.seen.lock().unwrap();
            if seen.contains(&key.action_id) || seen.contains(&key.composite) {
                return false;
            }
            seen.insert(key.action_id.clone());
            seen.insert(key.composite.clone());
            true
        }
    }

    fn permission(id: &str, kind: &str, call_id: &str) -> HostEvent {
        serde_json::from_value(json!({
            "type": "permission.updated",
            "properties": {
                "id": id,
                "sessionID": "ses_1",
                "messageID": "msg_2",
                "callID": call_id,
                "type": kind
            }
        }))
        .unwrap()
    }

    fn shell_transcript(narration: &str) -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::new("msg_1", Role::User, vec![Part::text("delete the temp directory")]),
            ConversationMessage::new(
                "msg_2",
                Role::Assistant,
                vec![
                    Part::text(narration),
                    Part::tool("call_1", "bash", json!({ "command": "rm -rf /tmp/x" })),
                ],
            ),
        ]
    }

    fn patch_transcript(narration: &str) -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::new("msg_1", Role::User, vec![Part::text("rename the helper")]),
            ConversationMessage::new(
                "msg_2",
                Role::Assistant,
                vec![
                    Part::text(narration),
                    Part::tool(
                        "call_1",
                        "apply_patch",
                        json!({ "patchText": "*** Begin Patch\n*** Update File: src/util.rs\n-fn a()\n+fn b()\n*** End Patch" }),
                    ),
                ],
            ),
        ]
    }

    struct Harness {
        orchestrator: Orchestrator,
        requests: Arc<Mutex<Vec<PreambleRequest>>>,
        toasts: Arc<Mutex<Vec<Toast>>>,
        history_calls: Arc<Mutex<u32>>,
    }

    fn harness(source: MockSource, generator: MockGenerator, notifier: MockNotifier) -> Harness {
        let requests = generator.requests.clone();
        let toasts = notifier.toasts.clone();
        let history_calls = source.history_calls.clone();
        let orchestrator = Orchestrator::new(
            Box::new(source),
            Box::new(generator),
            Box::new(notifier),
            Box::new(MockLedger::default()),
            NarrationConfig::default(),
        );
        Harness {
            orchestrator,
            requests,
            toasts,
            history_calls,
        }
    }

    // ── Test cases ───────────────────────────────────────────────────────────

    /// An unexplained shell command gets a preamble that carries both the
    /// user's request and the pending command.
    #[tokio::test]
    async fn test_unnarrated_shell_dispatches() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        assert_eq!(outcome, PreambleOutcome::Dispatched);

        let requests = h.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.session_id, "ses_1");
        assert_eq!(request.message_id, "msg_2");
        assert_eq!(request.profile, "narration");
        assert!(request.prompt().contains("User's latest message:\ndelete the temp directory"));
        assert!(request.prompt().contains("rm -rf /tmp/x"));
        assert!(request.prompt().contains("shell command"));

        let toasts = h.toasts.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Narration");
        assert_eq!(toasts[0].duration_ms, 6000);
    }

    /// Repeated notifications, whether under the same id or the same
    /// (session, message, call) triple, produce exactly one request.
    #[tokio::test]
    async fn test_duplicates_dispatch_once() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let first = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        let same_id = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        let same_triple = h.orchestrator.handle(permission("perm_9", "bash", "call_1")).await;

        assert_eq!(first, PreambleOutcome::Dispatched);
        assert_eq!(same_id, PreambleOutcome::Duplicate);
        assert_eq!(same_triple, PreambleOutcome::Duplicate);
        assert_eq!(h.requests.lock().unwrap().len(), 1);
    }

    /// Long enough narration short-circuits before history is fetched.
    #[tokio::test]
    async fn test_sufficient_narration_short_circuits() {
        let narration = "I am going to remove the temporary build directory under /tmp/x \
                         because it holds stale artifacts from the last failed run.";
        let h = harness(
            MockSource::new(shell_transcript(narration)),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;

        assert_eq!(outcome, PreambleOutcome::NarrationSufficient);
        assert_eq!(*h.history_calls.lock().unwrap(), 0, "history must not be fetched");
        assert!(h.requests.lock().unwrap().is_empty());
        assert!(h.toasts.lock().unwrap().is_empty());
    }

    /// A terse patch explanation still triggers a preamble that includes
    /// the assistant's text and the affected files.
    #[tokio::test]
    async fn test_terse_patch_dispatches_with_files() {
        let h = harness(
            MockSource::new(patch_transcript("Renaming.")),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let outcome = h.orchestrator.handle(permission("perm_1", "edit", "call_1")).await;
        assert_eq!(outcome, PreambleOutcome::Dispatched);

        let requests = h.requests.lock().unwrap();
        let prompt = requests[0].prompt();
        assert!(prompt.contains("file change"));
        assert!(prompt.contains("Assistant already wrote (may be too short):\nRenaming."));
        assert!(prompt.contains("\"src/util.rs\""));
        assert!(prompt.contains("\"lines\": 5"));
    }

    /// Any narration on a plain edit is enough.
    #[tokio::test]
    async fn test_plain_edit_with_any_text_is_sufficient() {
        let history = vec![ConversationMessage::new(
            "msg_2",
            Role::Assistant,
            vec![
                Part::text("Fixing typo."),
                Part::tool("call_1", "edit", json!({ "filePath": "README.md" })),
            ],
        )];
        let h = harness(MockSource::new(history), MockGenerator::new(), MockNotifier::new());

        let outcome = h.orchestrator.handle(permission("perm_1", "edit", "call_1")).await;
        assert_eq!(outcome, PreambleOutcome::NarrationSufficient);
    }

    /// If the anchor message cannot be fetched the pipeline stops quietly.
    #[tokio::test]
    async fn test_anchor_failure_aborts_silently() {
        let mut source = MockSource::new(shell_transcript(""));
        source.fail_message = true;
        let h = harness(source, MockGenerator::new(), MockNotifier::new());

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;

        assert!(matches!(outcome, PreambleOutcome::AnchorUnavailable { .. }));
        assert!(h.requests.lock().unwrap().is_empty());
        assert!(h.toasts.lock().unwrap().is_empty(), "no user-visible error on fetch failure");
    }

    /// A failed history fetch still produces a preamble, minus the user text.
    #[tokio::test]
    async fn test_history_failure_degrades() {
        let mut source = MockSource::new(shell_transcript(""));
        source.fail_history = true;
        let h = harness(source, MockGenerator::new(), MockNotifier::new());

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;

        assert_eq!(outcome, PreambleOutcome::Dispatched);
        let requests = h.requests.lock().unwrap();
        assert!(!requests[0].prompt().contains("User's latest message"));
    }

    /// A rejected submission is reported by toast and never escapes.
    #[tokio::test]
    async fn test_dispatch_failure_is_contained() {
        let mut generator = MockGenerator::new();
        generator.fail = true;
        let h = harness(MockSource::new(shell_transcript("")), generator, MockNotifier::new());

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;

        match outcome {
            PreambleOutcome::DispatchFailed { reason } => {
                assert!(reason.contains("agent not found"), "unexpected reason: {reason}");
            }
            other => panic!("expected DispatchFailed, got {:?}", other),
        }

        let toasts = h.toasts.lock().unwrap();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[1].message, "Could not generate explanation (plugin error).");

        // The ledger still holds the action: a retry notification is a duplicate.
        drop(toasts);
        let retry = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        assert_eq!(retry, PreambleOutcome::Duplicate);
    }

    /// Toast failures do not change the outcome.
    #[tokio::test]
    async fn test_toast_failure_is_ignored() {
        let mut notifier = MockNotifier::new();
        notifier.fail = true;
        let h = harness(MockSource::new(shell_transcript("")), MockGenerator::new(), notifier);

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        assert_eq!(outcome, PreambleOutcome::Dispatched);
    }

    /// Ungated kinds are ignored without being recorded, so the same id can
    /// still be admitted later as a gated action.
    #[tokio::test]
    async fn test_ungated_kind_is_not_recorded() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let ignored = h.orchestrator.handle(permission("perm_1", "webfetch", "call_1")).await;
        assert_eq!(
            ignored,
            PreambleOutcome::Ignored {
                reason: IgnoreReason::Notice(NoticeRejection::Ungated {
                    kind: "webfetch".to_string()
                })
            }
        );

        let admitted = h.orchestrator.handle(permission("perm_1", "bash", "call_1")).await;
        assert_eq!(admitted, PreambleOutcome::Dispatched);
    }

    #[tokio::test]
    async fn test_non_permission_event_is_ignored() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );
        let event: HostEvent =
            serde_json::from_value(json!({ "type": "message.updated", "properties": {} })).unwrap();

        let outcome = h.orchestrator.handle(event).await;
        assert_eq!(
            outcome,
            PreambleOutcome::Ignored {
                reason: IgnoreReason::NotPermission
            }
        );
    }

    /// A missing tool part still yields a generic preamble.
    #[tokio::test]
    async fn test_unknown_call_uses_generic_payload() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );

        let outcome = h.orchestrator.handle(permission("perm_1", "bash", "call_404")).await;
        assert_eq!(outcome, PreambleOutcome::Dispatched);
        assert!(h.requests.lock().unwrap()[0].prompt().contains("\"tool\": \"unknown\""));
    }

    /// `observe` runs the pipeline on a spawned task.
    #[tokio::test]
    async fn test_observe_runs_in_background() {
        let h = harness(
            MockSource::new(shell_transcript("")),
            MockGenerator::new(),
            MockNotifier::new(),
        );
        let requests = h.requests.clone();
        let orchestrator = Arc::new(h.orchestrator);

        let handle = orchestrator.observe(permission("perm_1", "bash", "call_1"));
        let outcome = handle.await.unwrap();

        assert_eq!(outcome, PreambleOutcome::Dispatched);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }
}
