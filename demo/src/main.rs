//! Narration Orchestrator: Demo CLI
//!
//! Runs one or all of the reference scenarios. Each scenario wires the real
//! orchestrator and ledger to an in-memory host loaded with a canned session.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- unnarrated-shell
//!   cargo run -p demo -- --config config/narrator.toml terse-patch
//!   cargo run -p demo -- provider-nudges --provider google

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use narrator_config::NarrationConfig;
use narrator_contracts::error::NarratorResult;
use narrator_ref_host::scenarios::{
    duplicate_burst, failing_dispatch, narrated_edit, provider_nudges, terse_patch,
    unnarrated_shell,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Narration orchestrator reference demo.
///
/// Each subcommand feeds permission notices for a pending edit or shell
/// command to the orchestrator and shows whether a preamble was requested.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Narration orchestrator reference demo",
    long_about = "Runs narration scenarios showing the sufficiency gate, prompt assembly,\n\
                  duplicate suppression, failure toasts, and provider nudges."
)]
struct Cli {
    /// Narration config file (TOML). Built-in defaults are used if omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all six scenarios in sequence.
    RunAll,
    /// Scenario 1: shell command with no explanation.
    UnnarratedShell,
    /// Scenario 2: two-file patch with a one-line explanation.
    TersePatch,
    /// Scenario 3: edit the assistant already explained.
    NarratedEdit,
    /// Scenario 4: four concurrent notifications for one action.
    DuplicateBurst,
    /// Scenario 5: generation profile rejects the request.
    FailingDispatch,
    /// Scenario 6: system prompt, tool hint, and tool summary nudges.
    ProviderNudges {
        /// Provider id for the nudged turn.
        #[arg(long, default_value = "openai")]
        provider: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for per-step pipeline logs.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match load_config(cli.config) {
        Ok(config) => run(&config, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<PathBuf>) -> NarratorResult<NarrationConfig> {
    match path {
        Some(path) => {
            let config = NarrationConfig::from_file(&path)?;
            info!(path = %path.display(), profile = %config.profile, "loaded narration config");
            Ok(config)
        }
        None => Ok(NarrationConfig::default()),
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

async fn run(config: &NarrationConfig, command: Command) -> NarratorResult<()> {
    match command {
        Command::RunAll => {
            unnarrated_shell::run_scenario(config).await;
            terse_patch::run_scenario(config).await;
            narrated_edit::run_scenario(config).await;
            duplicate_burst::run_scenario(config).await;
            failing_dispatch::run_scenario(config).await;
            provider_nudges::run_scenario(config, "openai").await;
        }
        Command::UnnarratedShell => {
            unnarrated_shell::run_scenario(config).await;
        }
        Command::TersePatch => {
            terse_patch::run_scenario(config).await;
        }
        Command::NarratedEdit => {
            narrated_edit::run_scenario(config).await;
        }
        Command::DuplicateBurst => {
            duplicate_burst::run_scenario(config).await;
        }
        Command::FailingDispatch => {
            failing_dispatch::run_scenario(config).await;
        }
        Command::ProviderNudges { provider } => {
            provider_nudges::run_scenario(config, &provider).await;
        }
    }
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Narration Orchestrator");
    println!("Reference Host Demo");
    println!("======================");
    println!();
    println!("Pipeline per permission notice:");
    println!("  [1] Decode the notice; only edit and shell actions are gated");
    println!("  [2] Ledger admits each action once (by id or session:message:call)");
    println!("  [3] Fetch the anchor message; stop if its narration is sufficient");
    println!("  [4] Recover the user's latest message and summarize the tool payload");
    println!("  [5] Show a toast and submit the preamble request to the narration profile");
    println!();
}
