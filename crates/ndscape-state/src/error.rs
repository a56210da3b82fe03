#![forbid(unsafe_code)]

//! Error types for the state layer.

use thiserror::Error;

pub use ndscape_core::{DomainError, IndexError, ValidationError};

/// Any hard failure a [`GeometryState`](crate::GeometryState) operation
/// can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failure to exchange a state snapshot with the preset manager.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preset rejected: {0}")]
    State(#[from] StateError),
}

/// Failure to load an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid engine config: {}", .problems.join("; "))]
    Invalid { problems: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_error_is_transparent() {
        let err = StateError::from(IndexError { index: 4, len: 2 });
        assert_eq!(err.to_string(), "parameter index 4 out of range (len 2)");
    }

    #[test]
    fn invalid_config_lists_problems() {
        let err = ConfigError::Invalid {
            problems: vec!["a".into(), "b".into()],
        };
        assert_eq!(err.to_string(), "invalid engine config: a; b");
    }
}
