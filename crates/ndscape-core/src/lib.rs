#![forbid(unsafe_code)]

//! Core: invariant primitives, dimension policy, and black-hole physics.
//!
//! # Role in ndscape
//! `ndscape-core` is the pure layer underneath the geometry state engine.
//! Nothing in here holds state: every function maps inputs to outputs and
//! is safe to call from any thread.
//!
//! # Primary responsibilities
//! - **Primitives**: clamping, ordered-pair enforcement, discrete snapping,
//!   and angle normalization.
//! - **Dimension**: the bounded ambient dimension (3..=11) and the
//!   visualization axis selection.
//! - **Policy**: exhaustive per-family tables of stability defaults
//!   (escape radius, iteration budget, extent, thickness) by dimension.
//! - **Kerr**: event horizon, ISCO, and photon orbit radii from mass and
//!   spin, plus the blackbody color fit used for accretion disks.
//!
//! # How it fits in the system
//! `ndscape-state` owns the mutable family records and calls into this
//! crate on every mutation. The renderer never touches this crate directly.

pub mod blackbody;
pub mod dimension;
pub mod error;
pub mod family;
pub mod kerr;
pub mod policy;
pub mod primitives;

pub use blackbody::{Rgb, blackbody_rgb, disk_temperature_to_color};
pub use dimension::{
    AxisSlot, Dimension, DomainMode, MAX_DIMENSION, MIN_DIMENSION, VisualizationAxes,
};
pub use error::{DomainError, IndexError, ValidationError};
pub use family::Family;
pub use kerr::{KerrDerived, MAX_SPIN, compute_kerr_radii};
pub use policy::{StabilityDefaults, policy_for, policy_for_dimension};
pub use primitives::{
    Bounds, OrderedPair, PairEnd, RESOLUTION_OPTIONS, clamp, ensure_ordered,
    normalize_angle_deg, normalize_angle_rad, snap_to_nearest,
};
