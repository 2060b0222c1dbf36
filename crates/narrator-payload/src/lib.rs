//! # narrator-payload
//!
//! Pure transforms that turn a pending tool call into something small enough
//! to put in a prompt:
//!
//! - [`text`]: bounded truncation and fail-safe JSON rendering
//! - [`patch`]: affected-file extraction from multi-file patches
//! - [`summary`]: per-tool payload summaries
//!
//! Nothing in this crate performs I/O or returns an error.

pub mod patch;
pub mod summary;
pub mod text;

pub use patch::extract_affected_files;
pub use summary::{summarize, PayloadSummary, PATCH_TOOL};
pub use text::{render_bounded, render_pretty, truncate, truncate_value, UNSERIALIZABLE};
