#![forbid(unsafe_code)]

//! Engine configuration, loadable from JSON (and TOML with the
//! `toml-config` feature).
//!
//! ```toml
//! # ndscape.toml
//! initial_dimension = 5
//! domain_mode = "clamp"
//! log_index_errors = true
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("ndscape.toml")?;
//! let state = GeometryState::with_config(config);
//! ```
//!
//! Missing fields take their defaults, so an empty file is valid.

use std::path::Path;

use ndscape_core::{DomainMode, MAX_DIMENSION, MIN_DIMENSION};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_INITIAL_DIMENSION: usize = 4;

/// Knobs of a [`GeometryState`](crate::GeometryState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Dimension every family is initialized for at construction.
    pub initial_dimension: usize,

    /// What a dimension outside `[3, 11]` does: `strict` returns a
    /// [`DomainError`](ndscape_core::DomainError), `clamp` saturates and
    /// logs a warning. Defaults to `strict` in debug builds.
    pub domain_mode: DomainMode,

    /// Log auxiliary index errors at `warn` before returning them.
    pub log_index_errors: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_dimension: DEFAULT_INITIAL_DIMENSION,
            domain_mode: DomainMode::default(),
            log_index_errors: cfg!(debug_assertions),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)?.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)?.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&self.initial_dimension) {
            errors.push(format!(
                "initial_dimension must be in [{MIN_DIMENSION}, {MAX_DIMENSION}], got {}",
                self.initial_dimension
            ));
        }

        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid { problems })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = EngineConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_initial_dimension_is_four() {
        assert_eq!(EngineConfig::default().initial_dimension, 4);
    }

    #[test]
    fn validate_catches_dimension_out_of_range() {
        let config = EngineConfig {
            initial_dimension: 2,
            ..EngineConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("initial_dimension")));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{"domain_mode":"clamp"}"#).unwrap();
        assert_eq!(config.domain_mode, DomainMode::Clamp);
        assert_eq!(config.initial_dimension, DEFAULT_INITIAL_DIMENSION);
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        let err = EngineConfig::from_json_str(r#"{"initial_dimension":12}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn json_round_trip() {
        let config = EngineConfig {
            initial_dimension: 7,
            domain_mode: DomainMode::Strict,
            log_index_errors: true,
        };
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
