#![forbid(unsafe_code)]

//! Mandelbox: box fold, sphere fold, scale, repeat.

use ndscape_core::{
    Bounds, Dimension, Family, OrderedPair, StabilityDefaults, ValidationError,
    policy_for_dimension,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::families::FractalColorMode;
use crate::slice::DimensionSlice;

pub const SCALE: Bounds = Bounds::new(-3.0, 3.0);
pub const FOLD_LIMIT: Bounds = Bounds::new(0.5, 2.0);
/// Sphere fold radii; the fixed radius stays strictly outside the minimum.
pub const FOLD_RADII: OrderedPair =
    OrderedPair::new(Bounds::new(0.05, 1.5), Bounds::new(0.1, 2.0), 0.05);
pub const MAX_ITERATIONS: Bounds = Bounds::new(5.0, 200.0);
pub const ESCAPE_RADIUS: Bounds = Bounds::new(2.0, 40.0);
pub const EXTENT: Bounds = Bounds::new(1.0, 8.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-3.0, 3.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MandelboxConfig {
    pub slice: DimensionSlice,
    pub scale: f64,
    pub fold_limit: f64,
    pub min_radius: f64,
    pub fixed_radius: f64,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub extent: f64,
    pub color_mode: FractalColorMode,
}

impl Default for MandelboxConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::Mandelbox, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            scale: -1.5,
            fold_limit: 1.0,
            min_radius: 0.5,
            fixed_radius: 1.0,
            max_iterations: policy.max_iterations,
            escape_radius: policy.escape_radius,
            extent: policy.extent,
            color_mode: FractalColorMode::default(),
        }
    }
}

impl FamilyConfig for MandelboxConfig {
    const FAMILY: Family = Family::Mandelbox;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = MandelboxPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.escape_radius = ESCAPE_RADIUS.clamp(policy.escape_radius);
        self.max_iterations = MAX_ITERATIONS.clamp_u32(policy.max_iterations);
        self.extent = EXTENT.clamp(policy.extent);
    }
}

pub type MandelboxController = Controller<MandelboxConfig>;

impl Controller<MandelboxConfig> {
    pub fn set_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("scale", scale, |c, v| c.scale = SCALE.clamp(v))
    }

    pub fn set_fold_limit(&mut self, limit: f64) -> Result<(), ValidationError> {
        self.commit_scalar("fold_limit", limit, |c, v| c.fold_limit = FOLD_LIMIT.clamp(v))
    }

    pub fn set_min_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("min_radius", radius, |c, v| {
            (c.min_radius, c.fixed_radius) = FOLD_RADII.set_low(v, c.fixed_radius);
        })
    }

    pub fn set_fixed_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("fixed_radius", radius, |c, v| {
            (c.min_radius, c.fixed_radius) = FOLD_RADII.set_high(c.min_radius, v);
        })
    }

    pub fn set_fold_radii(&mut self, min: f64, fixed: f64) -> Result<(), ValidationError> {
        let min = ValidationError::check_finite("min_radius", min)?;
        self.commit_scalar("fixed_radius", fixed, |c, fixed| {
            (c.min_radius, c.fixed_radius) = FOLD_RADII.set_both(min, fixed);
        })
    }

    pub fn set_max_iterations(&mut self, iterations: u32) {
        self.commit(|c| c.max_iterations = MAX_ITERATIONS.clamp_u32(iterations));
    }

    pub fn set_escape_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("escape_radius", radius, |c, v| c.escape_radius = ESCAPE_RADIUS.clamp(v))
    }

    pub fn set_extent(&mut self, extent: f64) -> Result<(), ValidationError> {
        self.commit_scalar("extent", extent, |c, v| c.extent = EXTENT.clamp(v))
    }

    pub fn set_color_mode(&mut self, mode: FractalColorMode) {
        self.commit(|c| c.color_mode = mode);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MandelboxPatch {
    pub scale: Option<f64>,
    pub fold_limit: Option<f64>,
    pub min_radius: Option<f64>,
    pub fixed_radius: Option<f64>,
    pub max_iterations: Option<u32>,
    pub escape_radius: Option<f64>,
    pub extent: Option<f64>,
    pub color_mode: Option<FractalColorMode>,
}

impl MandelboxPatch {
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_fold_limit(mut self, limit: f64) -> Self {
        self.fold_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_min_radius(mut self, radius: f64) -> Self {
        self.min_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_fixed_radius(mut self, radius: f64) -> Self {
        self.fixed_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    #[must_use]
    pub fn with_escape_radius(mut self, radius: f64) -> Self {
        self.escape_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: FractalColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }
}

impl From<&MandelboxConfig> for MandelboxPatch {
    fn from(c: &MandelboxConfig) -> Self {
        Self {
            scale: Some(c.scale),
            fold_limit: Some(c.fold_limit),
            min_radius: Some(c.min_radius),
            fixed_radius: Some(c.fixed_radius),
            max_iterations: Some(c.max_iterations),
            escape_radius: Some(c.escape_radius),
            extent: Some(c.extent),
            color_mode: Some(c.color_mode),
        }
    }
}

impl ConfigPatch<MandelboxConfig> for MandelboxPatch {
    fn apply_to(&self, c: &mut MandelboxController) -> Result<(), ValidationError> {
        if let Some(v) = self.scale {
            c.set_scale(v)?;
        }
        if let Some(v) = self.fold_limit {
            c.set_fold_limit(v)?;
        }
        match (self.min_radius, self.fixed_radius) {
            (Some(min), Some(fixed)) => c.set_fold_radii(min, fixed)?,
            (Some(min), None) => c.set_min_radius(min)?,
            (None, Some(fixed)) => c.set_fixed_radius(fixed)?,
            (None, None) => {}
        }
        if let Some(v) = self.max_iterations {
            c.set_max_iterations(v);
        }
        if let Some(v) = self.escape_radius {
            c.set_escape_radius(v)?;
        }
        if let Some(v) = self.extent {
            c.set_extent(v)?;
        }
        if let Some(v) = self.color_mode {
            c.set_color_mode(v);
        }
        Ok(())
    }
}
