//! Scenario 4: Duplicate Notification Burst
//!
//! The host announces one pending shell command four times at once: twice
//! bare, once wrapped in a global envelope, and once more under a fresh
//! permission id. All four are observed concurrently. The ledger admits
//! exactly one and the rest come back as duplicates.

use tracing::warn;

use narrator_config::NarrationConfig;

use crate::host::Failures;
use crate::transcripts::{enveloped_permission_event, permission_event, unnarrated_shell};

use super::{print_outcome, Rig, ScenarioReport};

/// Run Scenario 4. Needs a multi-threaded runtime to show real contention.
pub async fn run_scenario(config: &NarrationConfig) -> ScenarioReport {
    println!("=== Scenario 4: Duplicate Notification Burst ===");
    println!();

    let rig = Rig::new(config, unnarrated_shell(), Failures::default());

    let burst = vec![
        ("perm_ref_04 (bare)", permission_event("perm_ref_04", "bash")),
        ("perm_ref_04 (bare)", permission_event("perm_ref_04", "bash")),
        ("perm_ref_04 (envelope)", enveloped_permission_event("perm_ref_04", "bash")),
        ("perm_ref_05 (re-issued)", permission_event("perm_ref_05", "bash")),
    ];
    println!("  Observing {} notifications for one action...", burst.len());
    println!();

    let handles: Vec<_> = burst
        .into_iter()
        .map(|(label, event)| (label, rig.orchestrator.observe(event)))
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (label, handle) in handles {
        match handle.await {
            Ok(outcome) => {
                print_outcome(label, &outcome);
                outcomes.push(outcome);
            }
            Err(e) => warn!(error = %e, "preamble task did not complete"),
        }
    }

    let report = rig.report(outcomes);
    println!();
    println!("  Dispatched:       {}", report.dispatched());
    println!("  Ledger entries:   {}", report.admitted);
    println!();
    println!("  Scenario 4 complete.");
    println!();

    report
}
