//! Scenario 2: Terse Multi-file Patch
//!
//! The agent explains a two-file patch in one short sentence, below the patch
//! threshold. The notice arrives wrapped in a global envelope. The preamble
//! prompt carries the assistant's text and a summary listing both files
//! instead of the raw patch.

use narrator_config::NarrationConfig;

use crate::host::Failures;
use crate::transcripts::{enveloped_permission_event, terse_patch};

use super::{print_outcome, print_prompt, Rig, ScenarioReport};

/// Run Scenario 2.
pub async fn run_scenario(config: &NarrationConfig) -> ScenarioReport {
    println!("=== Scenario 2: Terse Multi-file Patch ===");
    println!();

    let rig = Rig::new(config, terse_patch(), Failures::default());

    println!("  Pending action:   {} (2 files)", config.patch_tool);
    println!(
        "  Assistant text:   \"Updating config loading.\" (below {} chars)",
        config.thresholds.patch_min_chars
    );
    println!();

    let outcome = rig
        .orchestrator
        .handle(enveloped_permission_event("perm_ref_02", "edit"))
        .await;
    print_outcome("permission.asked", &outcome);
    println!();

    let report = rig.report(vec![outcome]);
    for request in &report.submissions {
        print_prompt(request);
    }

    println!();
    println!("  Scenario 2 complete.");
    println!();

    report
}
