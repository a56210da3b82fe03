#![forbid(unsafe_code)]

//! Nested tori: concentric Hopf-fibered tori between an inner and an
//! outer radius.

use std::f64::consts::PI;

use ndscape_core::{
    Bounds, Dimension, Family, OrderedPair, RESOLUTION_OPTIONS, StabilityDefaults,
    ValidationError, normalize_angle_deg, snap_to_nearest,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const RADII: OrderedPair = OrderedPair::new(Bounds::new(0.1, 4.9), Bounds::new(0.2, 5.0), 0.1);
pub const LAYER_COUNT: Bounds = Bounds::new(2.0, 8.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-PI, PI);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedTorusConfig {
    pub slice: DimensionSlice,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub layer_count: u32,
    /// Twist between successive layers, in `[0, 360)`.
    pub twist_deg: f64,
    pub fiber_resolution: u32,
}

impl Default for NestedTorusConfig {
    fn default() -> Self {
        Self {
            slice: DimensionSlice::default(),
            inner_radius: 1.0,
            outer_radius: 2.0,
            layer_count: 3,
            twist_deg: 0.0,
            fiber_resolution: 48,
        }
    }
}

impl FamilyConfig for NestedTorusConfig {
    const FAMILY: Family = Family::NestedTorus;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = NestedTorusPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, _policy: StabilityDefaults) {}
}

pub type NestedTorusController = Controller<NestedTorusConfig>;

impl Controller<NestedTorusConfig> {
    pub fn set_inner_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("inner_radius", radius, |c, v| {
            (c.inner_radius, c.outer_radius) = RADII.set_low(v, c.outer_radius);
        })
    }

    pub fn set_outer_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("outer_radius", radius, |c, v| {
            (c.inner_radius, c.outer_radius) = RADII.set_high(c.inner_radius, v);
        })
    }

    pub fn set_radii(&mut self, inner: f64, outer: f64) -> Result<(), ValidationError> {
        let inner = ValidationError::check_finite("inner_radius", inner)?;
        self.commit_scalar("outer_radius", outer, |c, outer| {
            (c.inner_radius, c.outer_radius) = RADII.set_both(inner, outer);
        })
    }

    pub fn set_layer_count(&mut self, count: u32) {
        self.commit(|c| c.layer_count = LAYER_COUNT.clamp_u32(count));
    }

    pub fn set_twist_deg(&mut self, degrees: f64) -> Result<(), ValidationError> {
        self.commit_scalar("twist_deg", degrees, |c, v| c.twist_deg = normalize_angle_deg(v))
    }

    pub fn set_fiber_resolution(&mut self, resolution: u32) {
        self.commit(|c| {
            c.fiber_resolution = snap_to_nearest(f64::from(resolution), &RESOLUTION_OPTIONS)
                .unwrap_or(c.fiber_resolution);
        });
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedTorusPatch {
    pub inner_radius: Option<f64>,
    pub outer_radius: Option<f64>,
    pub layer_count: Option<u32>,
    pub twist_deg: Option<f64>,
    pub fiber_resolution: Option<u32>,
}

impl NestedTorusPatch {
    #[must_use]
    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.inner_radius = Some(inner);
        self.outer_radius = Some(outer);
        self
    }

    #[must_use]
    pub fn with_layer_count(mut self, count: u32) -> Self {
        self.layer_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_twist_deg(mut self, degrees: f64) -> Self {
        self.twist_deg = Some(degrees);
        self
    }

    #[must_use]
    pub fn with_fiber_resolution(mut self, resolution: u32) -> Self {
        self.fiber_resolution = Some(resolution);
        self
    }
}

impl From<&NestedTorusConfig> for NestedTorusPatch {
    fn from(c: &NestedTorusConfig) -> Self {
        Self {
            inner_radius: Some(c.inner_radius),
            outer_radius: Some(c.outer_radius),
            layer_count: Some(c.layer_count),
            twist_deg: Some(c.twist_deg),
            fiber_resolution: Some(c.fiber_resolution),
        }
    }
}

impl ConfigPatch<NestedTorusConfig> for NestedTorusPatch {
    fn apply_to(&self, c: &mut NestedTorusController) -> Result<(), ValidationError> {
        match (self.inner_radius, self.outer_radius) {
            (Some(inner), Some(outer)) => c.set_radii(inner, outer)?,
            (Some(inner), None) => c.set_inner_radius(inner)?,
            (None, Some(outer)) => c.set_outer_radius(outer)?,
            (None, None) => {}
        }
        if let Some(v) = self.layer_count {
            c.set_layer_count(v);
        }
        if let Some(v) = self.twist_deg {
            c.set_twist_deg(v)?;
        }
        if let Some(v) = self.fiber_resolution {
            c.set_fiber_resolution(v);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_ordering_survives_either_order() {
        let mut c = NestedTorusController::new();
        c.set_outer_radius(0.0).unwrap();
        assert_eq!(c.config().outer_radius, 1.1);
        c.set_inner_radius(100.0).unwrap();
        let cfg = c.config();
        assert!(RADII.is_ordered(cfg.inner_radius, cfg.outer_radius));
        assert_eq!(cfg.outer_radius, 1.1);
    }

    #[test]
    fn radii_patch_reaches_far_values() {
        let mut c = NestedTorusController::new();
        c.apply(&NestedTorusPatch::default().with_radii(4.0, 4.8)).unwrap();
        assert_eq!((c.config().inner_radius, c.config().outer_radius), (4.0, 4.8));
    }

    #[test]
    fn twist_wraps_and_layers_clamp() {
        let mut c = NestedTorusController::new();
        c.set_twist_deg(725.0).unwrap();
        assert_eq!(c.config().twist_deg, 5.0);
        c.set_layer_count(1);
        assert_eq!(c.config().layer_count, 2);
    }

    #[test]
    fn auxiliary_range_is_an_angle() {
        let mut c = NestedTorusController::for_dimension(Dimension::new(4).unwrap());
        c.set_parameter_value(0, 10.0).unwrap();
        assert_eq!(c.parameter_values(), &[PI]);
    }
}
