//! # narrator-ref-host
//!
//! Reference host for the narration orchestrator.
//!
//! Demonstrates six scenarios against an in-memory host:
//!
//! 1. **Unnarrated Shell Command**: no explanation at all, preamble dispatched.
//! 2. **Terse Multi-file Patch**: explanation below the patch threshold,
//!    delivered in a global envelope; the prompt lists affected files.
//! 3. **Already-narrated Edit**: the gate short-circuits.
//! 4. **Duplicate Notification Burst**: four concurrent notifications for one
//!    action, one dispatch.
//! 5. **Failing Dispatch**: failure toast, no retry.
//! 6. **Provider Nudges**: the `HostHooks` surface for a nudged provider.
//!
//! All transcripts are hardcoded and fictional. No model is ever called.

pub mod host;
pub mod scenarios;
pub mod transcripts;
