#![forbid(unsafe_code)]

//! Menger sponge and its n-cube generalization.

use ndscape_core::{
    Bounds, Dimension, Family, StabilityDefaults, ValidationError, policy_for_dimension,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const DEPTH: Bounds = Bounds::new(1.0, 8.0);
pub const SCALE: Bounds = Bounds::new(0.5, 3.0);
pub const EXTENT: Bounds = Bounds::new(0.5, 4.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-1.0, 1.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MengerConfig {
    pub slice: DimensionSlice,
    /// Recursion depth of the sponge.
    pub depth: u32,
    pub scale: f64,
    pub extent: f64,
}

impl Default for MengerConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::Menger, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            depth: policy.max_iterations,
            scale: 1.0,
            extent: policy.extent,
        }
    }
}

impl FamilyConfig for MengerConfig {
    const FAMILY: Family = Family::Menger;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = MengerPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.depth = DEPTH.clamp_u32(policy.max_iterations);
        self.extent = EXTENT.clamp(policy.extent);
    }
}

pub type MengerController = Controller<MengerConfig>;

impl Controller<MengerConfig> {
    pub fn set_depth(&mut self, depth: u32) {
        self.commit(|c| c.depth = DEPTH.clamp_u32(depth));
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("scale", scale, |c, v| c.scale = SCALE.clamp(v))
    }

    pub fn set_extent(&mut self, extent: f64) -> Result<(), ValidationError> {
        self.commit_scalar("extent", extent, |c, v| c.extent = EXTENT.clamp(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MengerPatch {
    pub depth: Option<u32>,
    pub scale: Option<f64>,
    pub extent: Option<f64>,
}

impl MengerPatch {
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }
}

impl From<&MengerConfig> for MengerPatch {
    fn from(c: &MengerConfig) -> Self {
        Self {
            depth: Some(c.depth),
            scale: Some(c.scale),
            extent: Some(c.extent),
        }
    }
}

impl ConfigPatch<MengerConfig> for MengerPatch {
    fn apply_to(&self, c: &mut MengerController) -> Result<(), ValidationError> {
        if let Some(v) = self.depth {
            c.set_depth(v);
        }
        if let Some(v) = self.scale {
            c.set_scale(v)?;
        }
        if let Some(v) = self.extent {
            c.set_extent(v)?;
        }
        Ok(())
    }
}
