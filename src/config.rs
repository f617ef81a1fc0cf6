//! Session configuration and the fixed constants of the game.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Keystrokes a participant must type before their data is usable for prediction.
pub const READINESS_THRESHOLD: u32 = 180;

/// Smallest roster that can switch to guessing.
pub const MIN_PARTICIPANTS: usize = 2;

/// Number of most recent unlabeled characters a predictor classifies.
pub const MASH_WINDOW: usize = 30;

/// Default round-trip budget for one predictor call.
pub const PREDICTOR_TIMEOUT_MS: u64 = 2000;

/// Every character a masher may type: each row of a standard keyboard plus space.
pub const ALLOWED_CHARS: &str = "`1234567890-=qwertyuiop[]\\asdfghjkl;'zxcvbnm,./ ";

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunable session parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub readiness_threshold: u32,
    pub min_participants: usize,
    pub predictor_timeout_ms: u64,
    pub mash_window: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            readiness_threshold: READINESS_THRESHOLD,
            min_participants: MIN_PARTICIPANTS,
            predictor_timeout_ms: PREDICTOR_TIMEOUT_MS,
            mash_window: MASH_WINDOW,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON document; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.readiness_threshold == 0 {
            return Err(ConfigError::Invalid(
                "readiness_threshold must be positive".to_string(),
            ));
        }
        if self.min_participants == 0 {
            return Err(ConfigError::Invalid(
                "min_participants must be at least 1".to_string(),
            ));
        }
        if self.mash_window == 0 {
            return Err(ConfigError::Invalid(
                "mash_window must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn predictor_timeout(&self) -> Duration {
        Duration::from_millis(self.predictor_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_named_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.readiness_threshold, 180);
        assert_eq!(config.min_participants, 2);
        assert_eq!(config.mash_window, 30);
        assert_eq!(config.predictor_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SessionConfig::from_json(r#"{"readiness_threshold": 50}"#).unwrap();
        assert_eq!(config.readiness_threshold, 50);
        assert_eq!(config.min_participants, MIN_PARTICIPANTS);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let result = SessionConfig::from_json(r#"{"readiness_threshold": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = SessionConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn allowed_chars_include_space_and_backslash() {
        assert!(ALLOWED_CHARS.contains(' '));
        assert!(ALLOWED_CHARS.contains('\\'));
        assert_eq!(ALLOWED_CHARS.chars().count(), 48);
    }
}
