//! Error types for the narration pipeline.
//!
//! Every collaborator call returns `NarratorResult<T>`. None of these errors
//! ever reach the host's approval flow: the orchestrator turns each one into a
//! `PreambleOutcome` or a logged warning.

use thiserror::Error;

/// The unified error type for the narration crates.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// The message that proposed the pending action could not be loaded.
    #[error("failed to fetch message '{message_id}' in session '{session_id}': {reason}")]
    MessageFetch {
        session_id: String,
        message_id: String,
        reason: String,
    },

    /// The session transcript could not be listed.
    #[error("failed to list history for session '{session_id}': {reason}")]
    HistoryFetch { session_id: String, reason: String },

    /// The generation request was rejected by the host.
    #[error("preamble dispatch failed: {reason}")]
    Dispatch { reason: String },

    /// A toast could not be shown.
    #[error("notification failed: {reason}")]
    Notification { reason: String },

    /// A structured value could not be rendered as JSON.
    #[error("serialization failed: {reason}")]
    Serialization { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl From<serde_json::Error> for NarratorError {
    fn from(err: serde_json::Error) -> Self {
        NarratorError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the narration crates.
pub type NarratorResult<T> = Result<T, NarratorError>;
