#![forbid(unsafe_code)]

//! Kali's abs-fold fractal: `z ← |z| / |z|² · fold_scale + c`.

use ndscape_core::{
    AxisSlot, Bounds, Dimension, Family, StabilityDefaults, ValidationError, policy_for_dimension,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::families::FractalColorMode;
use crate::slice::DimensionSlice;

/// Range of each component of the additive constant.
pub const CONSTANT: Bounds = Bounds::new(-2.0, 2.0);
pub const FOLD_SCALE: Bounds = Bounds::new(0.5, 2.0);
pub const MAX_ITERATIONS: Bounds = Bounds::new(4.0, 64.0);
pub const ESCAPE_RADIUS: Bounds = Bounds::new(1.5, 20.0);
pub const EXTENT: Bounds = Bounds::new(1.0, 6.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

pub const DEFAULT_CONSTANT: [f64; 3] = [-0.6, -0.4, -0.2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KaliConfig {
    pub slice: DimensionSlice,
    pub constant: [f64; 3],
    pub fold_scale: f64,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub extent: f64,
    pub color_mode: FractalColorMode,
}

impl Default for KaliConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::Kali, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            constant: DEFAULT_CONSTANT,
            fold_scale: 1.0,
            max_iterations: policy.max_iterations,
            escape_radius: policy.escape_radius,
            extent: policy.extent,
            color_mode: FractalColorMode::default(),
        }
    }
}

impl FamilyConfig for KaliConfig {
    const FAMILY: Family = Family::Kali;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = KaliPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.escape_radius = ESCAPE_RADIUS.clamp(policy.escape_radius);
        self.max_iterations = MAX_ITERATIONS.clamp_u32(policy.max_iterations);
        self.extent = EXTENT.clamp(policy.extent);
    }
}

pub type KaliController = Controller<KaliConfig>;

impl Controller<KaliConfig> {
    /// Set one component of the constant.
    pub fn set_constant_component(
        &mut self,
        slot: AxisSlot,
        value: f64,
    ) -> Result<(), ValidationError> {
        self.commit_scalar("constant", value, |c, v| {
            c.constant[slot.index()] = CONSTANT.clamp(v);
        })
    }

    /// Set the whole constant. Every component must be finite.
    pub fn set_constant(&mut self, constant: [f64; 3]) -> Result<(), ValidationError> {
        for v in constant {
            ValidationError::check_finite("constant", v)?;
        }
        self.commit(|c| c.constant = constant.map(|v| CONSTANT.clamp(v)));
        Ok(())
    }

    pub fn set_fold_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("fold_scale", scale, |c, v| c.fold_scale = FOLD_SCALE.clamp(v))
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
pub struct KaliPatch {
    pub constant: Option<[f64; 3]>,
    pub fold_scale: Option<f64>,
    pub max_iterations: Option<u32>,
    pub escape_radius: Option<f64>,
    pub extent: Option<f64>,
    pub color_mode: Option<FractalColorMode>,
}

impl KaliPatch {
    #[must_use]
    pub fn with_constant(mut self, constant: [f64; 3]) -> Self {
        self.constant = Some(constant);
        self
    }

    #[must_use]
    pub fn with_fold_scale(mut self, scale: f64) -> Self {
        self.fold_scale = Some(scale);
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

impl From<&KaliConfig> for KaliPatch {
    fn from(c: &KaliConfig) -> Self {
        Self {
            constant: Some(c.constant),
            fold_scale: Some(c.fold_scale),
            max_iterations: Some(c.max_iterations),
            escape_radius: Some(c.escape_radius),
            extent: Some(c.extent),
            color_mode: Some(c.color_mode),
        }
    }
}

impl ConfigPatch<KaliConfig> for KaliPatch {
    fn apply_to(&self, c: &mut KaliController) -> Result<(), ValidationError> {
        if let Some(v) = self.constant {
            c.set_constant(v)?;
        }
        if let Some(v) = self.fold_scale {
            c.set_fold_scale(v)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_components_clamp_independently() {
        let mut c = KaliController::new();
        c.set_constant_component(AxisSlot::Y, 7.0).unwrap();
        assert_eq!(c.config().constant, [-0.6, 2.0, -0.2]);
    }

    #[test]
    fn whole_constant_rejects_any_non_finite() {
        let mut c = KaliController::new();
        let err = c.set_constant([0.0, f64::NAN, 0.0]).unwrap_err();
        assert_eq!(err.field(), "constant");
        assert_eq!(c.config().constant, DEFAULT_CONSTANT);
    }

    #[test]
    fn iteration_budget_shrinks_with_dimension() {
        let mut c = KaliController::new();
        assert_eq!(c.config().max_iterations, 30);
        c.initialize_for_dimension(Dimension::new(11).unwrap());
        assert_eq!(c.config().max_iterations, 16);
        assert_eq!(c.config().escape_radius, 10.0);
    }
}
