#![forbid(unsafe_code)]

//! Mandelbulb (3D) and Hyperbulb (4D and up).
//!
//! The power-`p` bulb iterates `z ← z^p + c` in hyperspherical
//! coordinates. Power, iteration budget and escape radius together decide
//! whether the raymarcher converges; [`initialize_for_dimension`] is the
//! only operation that moves the budget and the escape radius together.
//!
//! [`initialize_for_dimension`]: crate::controller::Controller::initialize_for_dimension

use ndscape_core::{
    Bounds, Dimension, Family, OrderedPair, RESOLUTION_OPTIONS, StabilityDefaults,
    ValidationError, snap_to_nearest,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::families::FractalColorMode;
use crate::slice::DimensionSlice;

pub const POWER: Bounds = Bounds::new(2.0, 16.0);
pub const MAX_ITERATIONS: Bounds = Bounds::new(10.0, 500.0);
pub const ESCAPE_RADIUS: Bounds = Bounds::new(2.0, 16.0);
pub const EXTENT: Bounds = Bounds::new(0.5, 4.0);
pub const POWER_SPEED: Bounds = Bounds::new(0.01, 1.0);
/// Power animation sweeps between `power_min` and `power_max`.
pub const POWER_RANGE: OrderedPair =
    OrderedPair::new(Bounds::new(2.0, 15.5), Bounds::new(2.5, 16.0), 0.5);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

pub const DEFAULT_POWER: f64 = 8.0;
pub const DEFAULT_RESOLUTION: u32 = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MandelbulbConfig {
    pub slice: DimensionSlice,
    pub power: f64,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub extent: f64,
    /// Sample grid resolution, one of [`RESOLUTION_OPTIONS`].
    pub resolution: u32,
    pub power_animation_enabled: bool,
    pub power_min: f64,
    pub power_max: f64,
    pub power_speed: f64,
    pub color_mode: FractalColorMode,
}

impl Default for MandelbulbConfig {
    fn default() -> Self {
        let policy = ndscape_core::policy_for_dimension(Family::Mandelbulb, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            power: DEFAULT_POWER,
            max_iterations: policy.max_iterations,
            escape_radius: policy.escape_radius,
            extent: policy.extent,
            resolution: DEFAULT_RESOLUTION,
            power_animation_enabled: false,
            power_min: 6.0,
            power_max: 10.0,
            power_speed: 0.1,
            color_mode: FractalColorMode::default(),
        }
    }
}

impl FamilyConfig for MandelbulbConfig {
    const FAMILY: Family = Family::Mandelbulb;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = MandelbulbPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.escape_radius = ESCAPE_RADIUS.clamp(policy.escape_radius);
        self.max_iterations = MAX_ITERATIONS.clamp_u32(policy.max_iterations);
        self.extent = EXTENT.clamp(policy.extent);
    }
}

pub type MandelbulbController = Controller<MandelbulbConfig>;

impl Controller<MandelbulbConfig> {
    pub fn set_power(&mut self, power: f64) -> Result<(), ValidationError> {
        self.commit_scalar("power", power, |c, v| c.power = POWER.clamp(v))
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

    /// Snap `resolution` to the nearest entry of [`RESOLUTION_OPTIONS`].
    pub fn set_resolution(&mut self, resolution: u32) {
        let current = self.config().resolution;
        let snapped =
            snap_to_nearest(f64::from(resolution), &RESOLUTION_OPTIONS).unwrap_or(current);
        self.commit(|c| c.resolution = snapped);
    }

    pub fn set_power_animation_enabled(&mut self, enabled: bool) {
        self.commit(|c| c.power_animation_enabled = enabled);
    }

    pub fn set_power_min(&mut self, power: f64) -> Result<(), ValidationError> {
        self.commit_scalar("power_min", power, |c, v| {
            (c.power_min, c.power_max) = POWER_RANGE.set_low(v, c.power_max);
        })
    }

    pub fn set_power_max(&mut self, power: f64) -> Result<(), ValidationError> {
        self.commit_scalar("power_max", power, |c, v| {
            (c.power_min, c.power_max) = POWER_RANGE.set_high(c.power_min, v);
        })
    }

    /// Set both sweep bounds; `max` yields if they collide.
    pub fn set_power_range(&mut self, min: f64, max: f64) -> Result<(), ValidationError> {
        let min = ValidationError::check_finite("power_min", min)?;
        self.commit_scalar("power_max", max, |c, max| {
            (c.power_min, c.power_max) = POWER_RANGE.set_both(min, max);
        })
    }

    pub fn set_power_speed(&mut self, speed: f64) -> Result<(), ValidationError> {
        self.commit_scalar("power_speed", speed, |c, v| c.power_speed = POWER_SPEED.clamp(v))
    }

    pub fn set_color_mode(&mut self, mode: FractalColorMode) {
        self.commit(|c| c.color_mode = mode);
    }
}

/// Partial Mandelbulb update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MandelbulbPatch {
    pub power: Option<f64>,
    pub max_iterations: Option<u32>,
    pub escape_radius: Option<f64>,
    pub extent: Option<f64>,
    pub resolution: Option<u32>,
    pub power_animation_enabled: Option<bool>,
    pub power_min: Option<f64>,
    pub power_max: Option<f64>,
    pub power_speed: Option<f64>,
    pub color_mode: Option<FractalColorMode>,
}

impl MandelbulbPatch {
    #[must_use]
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = Some(power);
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
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = Some(resolution);
        self
    }

    #[must_use]
    pub fn with_power_animation(mut self, enabled: bool, min: f64, max: f64, speed: f64) -> Self {
        self.power_animation_enabled = Some(enabled);
        self.power_min = Some(min);
        self.power_max = Some(max);
        self.power_speed = Some(speed);
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: FractalColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }
}

impl From<&MandelbulbConfig> for MandelbulbPatch {
    fn from(c: &MandelbulbConfig) -> Self {
        Self {
            power: Some(c.power),
            max_iterations: Some(c.max_iterations),
            escape_radius: Some(c.escape_radius),
            extent: Some(c.extent),
            resolution: Some(c.resolution),
            power_animation_enabled: Some(c.power_animation_enabled),
            power_min: Some(c.power_min),
            power_max: Some(c.power_max),
            power_speed: Some(c.power_speed),
            color_mode: Some(c.color_mode),
        }
    }
}

impl ConfigPatch<MandelbulbConfig> for MandelbulbPatch {
    fn apply_to(&self, c: &mut MandelbulbController) -> Result<(), ValidationError> {
        if let Some(v) = self.power {
            c.set_power(v)?;
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
        if let Some(v) = self.resolution {
            c.set_resolution(v);
        }
        if let Some(v) = self.power_animation_enabled {
            c.set_power_animation_enabled(v);
        }
        match (self.power_min, self.power_max) {
            (Some(min), Some(max)) => c.set_power_range(min, max)?,
            (Some(min), None) => c.set_power_min(min)?,
            (None, Some(max)) => c.set_power_max(max)?,
            (None, None) => {}
        }
        if let Some(v) = self.power_speed {
            c.set_power_speed(v)?;
        }
        if let Some(v) = self.color_mode {
            c.set_color_mode(v);
        }
        Ok(())
    }
}
