//! Scenario 3: Already-narrated Edit
//!
//! The agent explained a single-file edit before calling the tool. Plain
//! edits accept any narration, so the gate short-circuits and nothing is
//! submitted.

use narrator_config::NarrationConfig;

use crate::host::Failures;
use crate::transcripts::{narrated_edit, permission_event};

use super::{print_outcome, Rig, ScenarioReport};

/// Run Scenario 3.
pub async fn run_scenario(config: &NarrationConfig) -> ScenarioReport {
    println!("=== Scenario 3: Already-narrated Edit ===");
    println!();

    let rig = Rig::new(config, narrated_edit(), Failures::default());

    println!("  Pending action:   edit README.md");
    println!("  Assistant text:   explains the typo fix");
    println!();

    let outcome = rig
        .orchestrator
        .handle(permission_event("perm_ref_03", "edit"))
        .await;
    print_outcome("permission.updated", &outcome);

    let report = rig.report(vec![outcome]);
    println!("  Requests submitted: {}", report.submissions.len());
    println!();
    println!("  Scenario 3 complete.");
    println!();

    report
}
