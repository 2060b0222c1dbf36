//! Reference scenarios.
//!
//! Each scenario wires a real `Orchestrator` and `InMemoryLedger` to an
//! `InMemoryHost` loaded with one canned transcript, feeds it permission
//! events, prints what happened, and returns a `ScenarioReport`.

pub mod duplicate_burst;
pub mod failing_dispatch;
pub mod narrated_edit;
pub mod provider_nudges;
pub mod terse_patch;
pub mod unnarrated_shell;

use std::sync::Arc;

use narrator_config::NarrationConfig;
use narrator_contracts::{
    message::ConversationMessage,
    outcome::PreambleOutcome,
    request::{PreambleRequest, Toast},
};
use narrator_core::Orchestrator;
use narrator_ledger::InMemoryLedger;

use crate::host::{Failures, InMemoryHost};
use crate::transcripts::SESSION_ID;

/// What a scenario observed.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub outcomes: Vec<PreambleOutcome>,
    pub submissions: Vec<PreambleRequest>,
    pub toasts: Vec<Toast>,
    /// Actions admitted by the ledger.
    pub admitted: usize,
}

impl ScenarioReport {
    pub fn dispatched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_dispatched()).count()
    }
}

/// Everything a scenario needs: the orchestrator plus inspection handles.
pub(crate) struct Rig {
    pub(crate) orchestrator: Arc<Orchestrator>,
    pub(crate) host: InMemoryHost,
    pub(crate) ledger: InMemoryLedger,
}

/// Wire an orchestrator to a fresh host and ledger, returning inspection
/// handles that share their state.
pub(crate) fn wire(
    config: &NarrationConfig,
    transcript: Vec<ConversationMessage>,
    failures: Failures,
) -> (Orchestrator, InMemoryHost, InMemoryLedger) {
    let host = InMemoryHost::new()
        .with_session(SESSION_ID, transcript)
        .with_failures(failures);
    let ledger = InMemoryLedger::new();
    let orchestrator = Orchestrator::new(
        Box::new(host.clone()),
        Box::new(host.clone()),
        Box::new(host.clone()),
        Box::new(ledger.clone()),
        config.clone(),
    );
    (orchestrator, host, ledger)
}

impl Rig {
    pub(crate) fn new(
        config: &NarrationConfig,
        transcript: Vec<ConversationMessage>,
        failures: Failures,
    ) -> Self {
        let (orchestrator, host, ledger) = wire(config, transcript, failures);
        Self {
            orchestrator: Arc::new(orchestrator),
            host,
            ledger,
        }
    }

    pub(crate) fn report(&self, outcomes: Vec<PreambleOutcome>) -> ScenarioReport {
        report(&self.host, &self.ledger, outcomes)
    }
}

pub(crate) fn report(
    host: &InMemoryHost,
    ledger: &InMemoryLedger,
    outcomes: Vec<PreambleOutcome>,
) -> ScenarioReport {
    ScenarioReport {
        outcomes,
        submissions: host.submissions(),
        toasts: host.toasts(),
        admitted: ledger.len(),
    }
}

/// Print one outcome line in the scenario transcript format.
pub(crate) fn print_outcome(label: &str, outcome: &PreambleOutcome) {
    let text = match outcome {
        PreambleOutcome::Ignored { reason } => format!("IGNORED ({:?})", reason),
        PreambleOutcome::Duplicate => "DUPLICATE (already handled)".to_string(),
        PreambleOutcome::AnchorUnavailable { reason } => format!("SKIPPED: {}", reason),
        PreambleOutcome::NarrationSufficient => "SKIPPED (narration sufficient)".to_string(),
        PreambleOutcome::Dispatched => "DISPATCHED".to_string(),
        PreambleOutcome::DispatchFailed { reason } => format!("DISPATCH FAILED: {}", reason),
    };
    println!("  {:<24}{}", label, text);
}

/// Print a submitted prompt, indented.
pub(crate) fn print_prompt(request: &PreambleRequest) {
    println!("  Prompt sent to profile '{}':", request.profile);
    println!("  ┌──────────────────────────────────────────");
    for line in request.prompt().lines() {
        println!("  │ {}", line);
    }
    println!("  └──────────────────────────────────────────");
}
