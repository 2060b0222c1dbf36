//! # narrator-core
//!
//! Decides, for each edit or shell command awaiting approval, whether the
//! agent already explained it, and if not, asks a dedicated narration profile
//! to write a short preamble before the user is prompted.
//!
//! This crate provides:
//! - The collaborator traits (`MessageSource`, `GenerationClient`, `Notifier`,
//!   `Ledger`) and the host callback trait `HostHooks`
//! - The `SufficiencyGate`, context assembly, and `PromptComposer`
//! - The `Orchestrator` that runs them in order, and `NarrationPlugin`, the
//!   `HostHooks` implementation hosts register
//!
//! ## Usage
//!
//! ```rust,ignore
//! use narrator_core::{NarrationPlugin, Orchestrator};
//!
//! let orchestrator = Orchestrator::new(source, generator, notifier, ledger, config);
//! let plugin = NarrationPlugin::new(orchestrator);
//! plugin.on_event(event).await;
//! ```

pub mod context;
pub mod gate;
pub mod nudge;
pub mod orchestrator;
pub mod plugin;
pub mod prompt;
pub mod traits;

pub use gate::{Narration, SufficiencyGate};
pub use orchestrator::Orchestrator;
pub use plugin::NarrationPlugin;
pub use prompt::PromptComposer;
