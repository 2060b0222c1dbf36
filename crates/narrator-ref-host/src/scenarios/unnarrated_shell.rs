//! Scenario 1: Unnarrated Shell Command
//!
//! The agent proposes `rm -rf /tmp/x` without a word of explanation. The gate
//! fires on absent narration, the assembler recovers the user's request
//! ("delete the temp directory"), and a preamble is dispatched.

use narrator_config::NarrationConfig;

use crate::host::Failures;
use crate::transcripts::{permission_event, unnarrated_shell};

use super::{print_outcome, print_prompt, Rig, ScenarioReport};

/// Run Scenario 1.
pub async fn run_scenario(config: &NarrationConfig) -> ScenarioReport {
    println!("=== Scenario 1: Unnarrated Shell Command ===");
    println!();

    let rig = Rig::new(config, unnarrated_shell(), Failures::default());

    println!("  Pending action:   bash `rm -rf /tmp/x`");
    println!("  Assistant text:   (none)");
    println!();

    let outcome = rig
        .orchestrator
        .handle(permission_event("perm_ref_01", "bash"))
        .await;
    print_outcome("permission.updated", &outcome);
    println!();

    let report = rig.report(vec![outcome]);
    for request in &report.submissions {
        print_prompt(request);
    }

    println!();
    println!("  Scenario 1 complete.");
    println!();

    report
}
