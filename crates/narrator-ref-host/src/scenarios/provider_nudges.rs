//! Scenario 6: Provider Nudges
//!
//! Drives a registered `NarrationPlugin` through one chat turn for a nudged
//! provider: the system prompt gains the narration block, tool descriptions
//! gain the hint, and tool output gains a one-line summary. A turn for a
//! provider outside the list is left untouched. Finally the plugin's
//! orchestrator handles the permission notice for the same turn.

use serde_json::json;
use tracing::warn;

use narrator_config::NarrationConfig;
use narrator_core::{traits::HostHooks, NarrationPlugin};

use crate::host::Failures;
use crate::transcripts::{permission_event, unnarrated_shell};

use super::{print_outcome, report, wire, ScenarioReport};

/// What the hooks did to each host artifact, per turn.
#[derive(Debug, Clone)]
pub struct NudgeReport {
    /// System prompt after the nudged turn.
    pub nudged_system: Vec<String>,
    /// System prompt after the un-nudged turn.
    pub plain_system: Vec<String>,
    pub tool_description: String,
    pub tool_output: Option<String>,
    pub preamble: ScenarioReport,
}

/// Run Scenario 6 with `provider` as the nudged turn's provider.
pub async fn run_scenario(config: &NarrationConfig, provider: &str) -> NudgeReport {
    println!("=== Scenario 6: Provider Nudges ===");
    println!();

    let (orchestrator, host, ledger) = wire(config, unnarrated_shell(), Failures::default());
    let plugin = NarrationPlugin::new(orchestrator);

    // ── Turn for a provider outside the list ────────────────────────────────
    let mut plain_system = vec!["You are a coding agent.".to_string()];
    plugin.on_chat_params(Some("anthropic")).await;
    plugin.on_system_transform(Some("anthropic"), &mut plain_system).await;
    println!("  provider 'anthropic':  {} system entries", plain_system.len());

    // ── Nudged turn ─────────────────────────────────────────────────────────
    let mut nudged_system = vec!["You are a coding agent.".to_string()];
    plugin.on_chat_params(Some(provider)).await;
    plugin.on_system_transform(Some(provider), &mut nudged_system).await;
    println!("  provider '{}':  {} system entries", provider, nudged_system.len());

    let mut tool_description = "Executes a shell command.".to_string();
    plugin.on_tool_definition(&mut tool_description).await;
    println!(
        "  bash description:      {}",
        tool_description.lines().next().unwrap_or_default()
    );

    let mut tool_output = Some("README.md\nsrc\n".to_string());
    plugin
        .on_tool_executed("bash", &json!({ "command": "ls" }), &mut tool_output)
        .await;
    let summary = tool_output
        .as_deref()
        .and_then(|out| out.lines().last())
        .unwrap_or_default()
        .to_string();
    println!("  bash output summary:   {}", summary);
    println!();

    // ── Permission notice for the same turn ─────────────────────────────────
    let mut outcomes = Vec::new();
    match plugin
        .orchestrator()
        .observe(permission_event("perm_ref_07", "bash"))
        .await
    {
        Ok(outcome) => {
            print_outcome("permission.updated", &outcome);
            outcomes.push(outcome);
        }
        Err(e) => warn!(error = %e, "preamble task did not complete"),
    }

    let preamble = report(&host, &ledger, outcomes);

    println!();
    println!("  Scenario 6 complete.");
    println!();

    NudgeReport {
        nudged_system,
        plain_system,
        tool_description,
        tool_output,
        preamble,
    }
}
