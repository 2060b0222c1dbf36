//! # narrator-ledger
//!
//! The dedup ledger for the narration orchestrator.
//!
//! ## Overview
//!
//! Hosts may announce the same pending action several times, sometimes under
//! a new permission id. `InMemoryLedger` remembers both the id and the
//! `session:message:call` triple of every admitted action and refuses any
//! later notification that matches either.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use narrator_ledger::InMemoryLedger;
//! use narrator_core::traits::Ledger;
//!
//! let ledger = InMemoryLedger::new();
//! assert!(ledger.admit(&action.dedup_key()));
//! assert!(!ledger.admit(&action.dedup_key()));
//! ```

pub mod entry;
pub mod memory;

pub use entry::LedgerEntry;
pub use memory::InMemoryLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────
