//! # narrator-config
//!
//! TOML-driven configuration for the narration orchestrator.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use narrator_config::NarrationConfig;
//!
//! let config = NarrationConfig::from_file(Path::new("config/narrator.toml"))?;
//! ```
//!
//! Missing keys fall back to the defaults in [`settings`]; an empty document
//! is valid and yields `NarrationConfig::default()`.

pub mod loader;
pub mod settings;

pub use settings::{NarrationConfig, NudgeSettings, PromptLimits, Thresholds, ToastSettings};

// ── Tests ─────────────────────────────────────────────────────────────────────
