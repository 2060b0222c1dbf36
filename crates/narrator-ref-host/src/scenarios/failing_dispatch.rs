//! Scenario 5: Failing Dispatch
//!
//! The generation profile rejects the request. The user sees the
//! "generating" toast followed by the failure toast, the failure is logged,
//! and a repeat notification for the same action is not retried.

use narrator_config::NarrationConfig;

use crate::host::Failures;
use crate::transcripts::{permission_event, unnarrated_shell};

use super::{print_outcome, Rig, ScenarioReport};

/// Run Scenario 5.
pub async fn run_scenario(config: &NarrationConfig) -> ScenarioReport {
    println!("=== Scenario 5: Failing Dispatch ===");
    println!();

    let failures = Failures {
        submit: true,
        ..Failures::default()
    };
    let rig = Rig::new(config, unnarrated_shell(), failures);

    let first = rig
        .orchestrator
        .handle(permission_event("perm_ref_06", "bash"))
        .await;
    print_outcome("first notification", &first);

    let repeat = rig
        .orchestrator
        .handle(permission_event("perm_ref_06", "bash"))
        .await;
    print_outcome("repeat notification", &repeat);
    println!();

    let report = rig.report(vec![first, repeat]);
    println!("  Toasts shown:");
    for toast in &report.toasts {
        println!("    [{:?}] {}: {}", toast.variant, toast.title, toast.message);
    }

    println!();
    println!("  Scenario 5 complete.");
    println!();

    report
}
