#![forbid(unsafe_code)]

//! Quaternion Julia sets, `q ← q^p + c` with a fixed quaternion `c`.
//!
//! Beyond 4D the extra axes are carried as auxiliary slice offsets; the
//! Julia constant itself stays a quaternion.

use ndscape_core::{
    Bounds, Dimension, Family, StabilityDefaults, ValidationError, policy_for_dimension,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::families::FractalColorMode;
use crate::slice::DimensionSlice;

pub const JULIA_CONSTANT: Bounds = Bounds::new(-2.0, 2.0);
pub const POWER: Bounds = Bounds::new(2.0, 8.0);
pub const MAX_ITERATIONS: Bounds = Bounds::new(8.0, 256.0);
pub const ESCAPE_RADIUS: Bounds = Bounds::new(2.0, 16.0);
pub const EXTENT: Bounds = Bounds::new(1.0, 4.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

pub const DEFAULT_JULIA_CONSTANT: [f64; 4] = [-0.2, 0.8, 0.0, 0.0];

/// One component of a quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuaternionComponent {
    W,
    X,
    Y,
    Z,
}

impl QuaternionComponent {
    pub const ALL: [QuaternionComponent; 4] = [Self::W, Self::X, Self::Y, Self::Z];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::W => 0,
            Self::X => 1,
            Self::Y => 2,
            Self::Z => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuaternionJuliaConfig {
    pub slice: DimensionSlice,
    pub julia_constant: [f64; 4],
    pub power: f64,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub extent: f64,
    pub color_mode: FractalColorMode,
}

impl Default for QuaternionJuliaConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::QuaternionJulia, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            julia_constant: DEFAULT_JULIA_CONSTANT,
            power: 2.0,
            max_iterations: policy.max_iterations,
            escape_radius: policy.escape_radius,
            extent: policy.extent,
            color_mode: FractalColorMode::default(),
        }
    }
}

impl FamilyConfig for QuaternionJuliaConfig {
    const FAMILY: Family = Family::QuaternionJulia;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = QuaternionJuliaPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.escape_radius = ESCAPE_RADIUS.clamp(policy.escape_radius);
        self.max_iterations = MAX_ITERATIONS.clamp_u32(policy.max_iterations);
        self.extent = EXTENT.clamp(policy.extent);
    }
}

pub type QuaternionJuliaController = Controller<QuaternionJuliaConfig>;

impl Controller<QuaternionJuliaConfig> {
    pub fn set_julia_component(
        &mut self,
        component: QuaternionComponent,
        value: f64,
    ) -> Result<(), ValidationError> {
        self.commit_scalar("julia_constant", value, |c, v| {
            c.julia_constant[component.index()] = JULIA_CONSTANT.clamp(v);
        })
    }

    pub fn set_julia_constant(&mut self, constant: [f64; 4]) -> Result<(), ValidationError> {
        for v in constant {
            ValidationError::check_finite("julia_constant", v)?;
        }
        self.commit(|c| c.julia_constant = constant.map(|v| JULIA_CONSTANT.clamp(v)));
        Ok(())
    }

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

    pub fn set_color_mode(&mut self, mode: FractalColorMode) {
        self.commit(|c| c.color_mode = mode);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuaternionJuliaPatch {
    pub julia_constant: Option<[f64; 4]>,
    pub power: Option<f64>,
    pub max_iterations: Option<u32>,
    pub escape_radius: Option<f64>,
    pub extent: Option<f64>,
    pub color_mode: Option<FractalColorMode>,
}

impl QuaternionJuliaPatch {
    #[must_use]
    pub fn with_julia_constant(mut self, constant: [f64; 4]) -> Self {
        self.julia_constant = Some(constant);
        self
    }

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
    pub fn with_color_mode(mut self, mode: FractalColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }
}

impl From<&QuaternionJuliaConfig> for QuaternionJuliaPatch {
    fn from(c: &QuaternionJuliaConfig) -> Self {
        Self {
            julia_constant: Some(c.julia_constant),
            power: Some(c.power),
            max_iterations: Some(c.max_iterations),
            escape_radius: Some(c.escape_radius),
            extent: Some(c.extent),
            color_mode: Some(c.color_mode),
        }
    }
}

impl ConfigPatch<QuaternionJuliaConfig> for QuaternionJuliaPatch {
    fn apply_to(&self, c: &mut QuaternionJuliaController) -> Result<(), ValidationError> {
        if let Some(v) = self.julia_constant {
            c.set_julia_constant(v)?;
        }
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
    fn component_index_matches_storage_order() {
        let mut c = QuaternionJuliaController::new();
        c.set_julia_component(QuaternionComponent::Z, -0.5).unwrap();
        c.set_julia_component(QuaternionComponent::W, 3.0).unwrap();
        assert_eq!(c.config().julia_constant, [2.0, 0.8, 0.0, -0.5]);
    }

    #[test]
    fn power_range() {
        let mut c = QuaternionJuliaController::new();
        c.set_power(1.0).unwrap();
        assert_eq!(c.config().power, 2.0);
        c.set_power(9.0).unwrap();
        assert_eq!(c.config().power, 8.0);
    }

    #[test]
    fn patch_from_json() {
        let json = r#"{"juliaConstant":[0.1,0.2,0.3,0.4],"maxIterations":1000}"#;
        let patch: QuaternionJuliaPatch = serde_json::from_str(json).unwrap();
        let mut c = QuaternionJuliaController::new();
        c.apply(&patch).unwrap();
        assert_eq!(c.config().julia_constant, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(c.config().max_iterations, 256);
    }
}
