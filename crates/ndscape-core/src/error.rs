#![forbid(unsafe_code)]

//! Error kinds surfaced by the state engine.
//!
//! Out-of-range slider input is never an error: it is clamped. The only
//! hard failures are an auxiliary index past the end of the vector, a
//! dimension outside the supported range, and a non-finite scalar.

use thiserror::Error;

use crate::dimension::{MAX_DIMENSION, MIN_DIMENSION};

/// An auxiliary-parameter index outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parameter index {index} out of range (len {len})")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// A dimension outside `[MIN_DIMENSION, MAX_DIMENSION]` passed to a policy
/// lookup or dimension constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "dimension {dimension} outside supported range {}..={}",
    MIN_DIMENSION,
    MAX_DIMENSION
)]
pub struct DomainError {
    pub dimension: usize,
}

/// Rejection of a scalar setter input that cannot be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("non-finite value {value} for field `{field}`")]
    NonFinite { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Pass `value` through if finite, otherwise report it against `field`.
    pub fn check_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { field, value })
        }
    }

    /// Name of the field the rejected value was aimed at.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonFinite { field, .. } => field,
        }
    }
}
