//! # narrator-contracts
//!
//! Shared types, wire envelopes, and errors for the narration preamble
//! orchestrator.
//!
//! All crates in the workspace import from here. No pipeline logic lives in
//! this crate, only data definitions, their wire shapes, and the error type.

pub mod action;
pub mod error;
pub mod event;
pub mod message;
pub mod outcome;
pub mod request;
