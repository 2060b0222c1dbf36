//! Loading and validating `NarrationConfig` from TOML.

use std::path::Path;

use tracing::debug;

use narrator_contracts::error::{NarratorError, NarratorResult};

use crate::settings::NarrationConfig;

impl NarrationConfig {
    /// Parse `s` as TOML, fill in defaults, and validate the result.
    ///
    /// Returns `NarratorError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or fails `validate()`.
    pub fn from_toml_str(s: &str) -> NarratorResult<Self> {
        let config: NarrationConfig = toml::from_str(s).map_err(|e| NarratorError::ConfigError {
            reason: format!("failed to parse narration TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it with `from_toml_str`.
    pub fn from_file(path: &Path) -> NarratorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| NarratorError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            profile = %config.profile,
            history_window = config.history_window,
            "narration config loaded"
        );
        Ok(config)
    }

    /// Reject settings that would make the pipeline meaningless.
    pub fn validate(&self) -> NarratorResult<()> {
        let invalid = |reason: &str| NarratorError::ConfigError {
            reason: reason.to_string(),
        };

        if self.profile.trim().is_empty() {
            return Err(invalid("profile must not be empty"));
        }
        if self.patch_tool.trim().is_empty() {
            return Err(invalid("patch_tool must not be empty"));
        }
        if self.history_window == 0 {
            return Err(invalid("history_window must be at least 1"));
        }
        let limits = &self.limits;
        if limits.assistant_text_chars == 0 || limits.user_text_chars == 0 || limits.payload_chars == 0 {
            return Err(invalid("prompt limits must be greater than zero"));
        }
        Ok(())
    }
}
