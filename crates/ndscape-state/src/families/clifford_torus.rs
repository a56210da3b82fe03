#![forbid(unsafe_code)]

//! Clifford torus and its generalization to `k` circle factors.
//!
//! The classic torus lives on the 3-sphere with angle `eta` between its
//! two circles. The generalized form takes `k` circles and needs `2k`
//! ambient dimensions, so `torus_k` is bounded by the dimension.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use ndscape_core::{
    Bounds, Dimension, Family, RESOLUTION_OPTIONS, StabilityDefaults, ValidationError,
    normalize_angle_rad, snap_to_nearest,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const RADIUS: Bounds = Bounds::new(0.5, 6.0);
pub const ETA: Bounds = Bounds::new(0.05, FRAC_PI_2 - 0.05);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-PI, PI);

pub const DEFAULT_TORUS_K: u32 = 2;

/// Largest circle count that fits in `dimension`.
#[must_use]
pub fn max_torus_k(dimension: Dimension) -> u32 {
    (dimension.get() / 2).max(1) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CliffordMode {
    #[default]
    Classic,
    Generalized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliffordTorusConfig {
    pub slice: DimensionSlice,
    pub mode: CliffordMode,
    pub radius: f64,
    pub eta: f64,
    /// In `[-π, π)`.
    pub phase_offset: f64,
    pub torus_k: u32,
    pub resolution_u: u32,
    pub resolution_v: u32,
}

impl Default for CliffordTorusConfig {
    fn default() -> Self {
        Self {
            slice: DimensionSlice::default(),
            mode: CliffordMode::default(),
            radius: 3.0,
            eta: FRAC_PI_4,
            phase_offset: 0.0,
            torus_k: DEFAULT_TORUS_K,
            resolution_u: 64,
            resolution_v: 32,
        }
    }
}

impl FamilyConfig for CliffordTorusConfig {
    const FAMILY: Family = Family::CliffordTorus;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = CliffordTorusPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, dimension: Dimension, _policy: StabilityDefaults) {
        self.torus_k = self.torus_k.clamp(1, max_torus_k(dimension));
    }
}

pub type CliffordTorusController = Controller<CliffordTorusConfig>;

impl Controller<CliffordTorusConfig> {
    pub fn set_mode(&mut self, mode: CliffordMode) {
        self.commit(|c| c.mode = mode);
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("radius", radius, |c, v| c.radius = RADIUS.clamp(v))
    }

    pub fn set_eta(&mut self, eta: f64) -> Result<(), ValidationError> {
        self.commit_scalar("eta", eta, |c, v| c.eta = ETA.clamp(v))
    }

    pub fn set_phase_offset(&mut self, phase: f64) -> Result<(), ValidationError> {
        self.commit_scalar("phase_offset", phase, |c, v| c.phase_offset = normalize_angle_rad(v))
    }

    /// Circle count, clamped into `[1, max(1, d/2)]` for the current
    /// dimension.
    pub fn set_torus_k(&mut self, k: u32) {
        let max = max_torus_k(self.dimension());
        self.commit(|c| c.torus_k = k.clamp(1, max));
    }

    pub fn set_resolution_u(&mut self, resolution: u32) {
        self.commit(|c| c.resolution_u = snap_resolution(resolution, c.resolution_u));
    }

    pub fn set_resolution_v(&mut self, resolution: u32) {
        self.commit(|c| c.resolution_v = snap_resolution(resolution, c.resolution_v));
    }
}

fn snap_resolution(requested: u32, current: u32) -> u32 {
    snap_to_nearest(f64::from(requested), &RESOLUTION_OPTIONS).unwrap_or(current)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliffordTorusPatch {
    pub mode: Option<CliffordMode>,
    pub radius: Option<f64>,
    pub eta: Option<f64>,
    pub phase_offset: Option<f64>,
    pub torus_k: Option<u32>,
    pub resolution_u: Option<u32>,
    pub resolution_v: Option<u32>,
}

impl CliffordTorusPatch {
    #[must_use]
    pub fn with_mode(mut self, mode: CliffordMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = Some(eta);
        self
    }

    #[must_use]
    pub fn with_phase_offset(mut self, phase: f64) -> Self {
        self.phase_offset = Some(phase);
        self
    }

    #[must_use]
    pub fn with_torus_k(mut self, k: u32) -> Self {
        self.torus_k = Some(k);
        self
    }

    #[must_use]
    pub fn with_resolution(mut self, u: u32, v: u32) -> Self {
        self.resolution_u = Some(u);
        self.resolution_v = Some(v);
        self
    }
}

impl From<&CliffordTorusConfig> for CliffordTorusPatch {
    fn from(c: &CliffordTorusConfig) -> Self {
        Self {
            mode: Some(c.mode),
            radius: Some(c.radius),
            eta: Some(c.eta),
            phase_offset: Some(c.phase_offset),
            torus_k: Some(c.torus_k),
            resolution_u: Some(c.resolution_u),
            resolution_v: Some(c.resolution_v),
        }
    }
}

impl ConfigPatch<CliffordTorusConfig> for CliffordTorusPatch {
    fn apply_to(&self, c: &mut CliffordTorusController) -> Result<(), ValidationError> {
        if let Some(v) = self.mode {
            c.set_mode(v);
        }
        if let Some(v) = self.radius {
            c.set_radius(v)?;
        }
        if let Some(v) = self.eta {
            c.set_eta(v)?;
        }
        if let Some(v) = self.phase_offset {
            c.set_phase_offset(v)?;
        }
        if let Some(v) = self.torus_k {
            c.set_torus_k(v);
        }
        if let Some(v) = self.resolution_u {
            c.set_resolution_u(v);
        }
        if let Some(v) = self.resolution_v {
            c.set_resolution_v(v);
        }
        Ok(())
    }
}
