#![forbid(unsafe_code)]

//! Root system polytopes (A_n, D_n and E8).

use ndscape_core::{Bounds, Dimension, Family, StabilityDefaults, ValidationError};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const SCALE: Bounds = Bounds::new(0.2, 4.0);
/// Relative slack when connecting roots at the shortest distance.
pub const EDGE_TOLERANCE: Bounds = Bounds::new(0.001, 0.5);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RootType {
    #[default]
    A,
    D,
    E8,
}

impl RootType {
    /// Whether this root system exists at `dimension`.
    pub const fn exists_at(self, dimension: Dimension) -> bool {
        match self {
            Self::A => true,
            Self::D => dimension.get() >= 4,
            Self::E8 => dimension.get() == 8,
        }
    }

    /// Walk E8 → D → A until a root system that exists at `dimension`.
    pub fn available_at(self, dimension: Dimension) -> Self {
        let mut candidate = self;
        loop {
            if candidate.exists_at(dimension) {
                return candidate;
            }
            candidate = match candidate {
                Self::E8 => Self::D,
                Self::D | Self::A => Self::A,
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootSystemConfig {
    pub slice: DimensionSlice,
    pub root_type: RootType,
    pub scale: f64,
    pub edge_tolerance: f64,
}

impl Default for RootSystemConfig {
    fn default() -> Self {
        Self {
            slice: DimensionSlice::default(),
            root_type: RootType::default(),
            scale: 1.0,
            edge_tolerance: 0.01,
        }
    }
}

impl FamilyConfig for RootSystemConfig {
    const FAMILY: Family = Family::RootSystem;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = RootSystemPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, dimension: Dimension, _policy: StabilityDefaults) {
        self.root_type = self.root_type.available_at(dimension);
    }
}

pub type RootSystemController = Controller<RootSystemConfig>;

impl Controller<RootSystemConfig> {
    /// Select a root system, falling back if it does not exist at the
    /// current dimension.
    pub fn set_root_type(&mut self, root_type: RootType) {
        let dimension = self.dimension();
        self.commit(|c| c.root_type = root_type.available_at(dimension));
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("scale", scale, |c, v| c.scale = SCALE.clamp(v))
    }

    pub fn set_edge_tolerance(&mut self, tolerance: f64) -> Result<(), ValidationError> {
        self.commit_scalar("edge_tolerance", tolerance, |c, v| {
            c.edge_tolerance = EDGE_TOLERANCE.clamp(v);
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootSystemPatch {
    pub root_type: Option<RootType>,
    pub scale: Option<f64>,
    pub edge_tolerance: Option<f64>,
}

impl RootSystemPatch {
    #[must_use]
    pub fn with_root_type(mut self, root_type: RootType) -> Self {
        self.root_type = Some(root_type);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_edge_tolerance(mut self, tolerance: f64) -> Self {
        self.edge_tolerance = Some(tolerance);
        self
    }
}

impl From<&RootSystemConfig> for RootSystemPatch {
    fn from(c: &RootSystemConfig) -> Self {
        Self {
            root_type: Some(c.root_type),
            scale: Some(c.scale),
            edge_tolerance: Some(c.edge_tolerance),
        }
    }
}

impl ConfigPatch<RootSystemConfig> for RootSystemPatch {
    fn apply_to(&self, c: &mut RootSystemController) -> Result<(), ValidationError> {
        if let Some(v) = self.root_type {
            c.set_root_type(v);
        }
        if let Some(v) = self.scale {
            c.set_scale(v)?;
        }
        if let Some(v) = self.edge_tolerance {
            c.set_edge_tolerance(v)?;
        }
        Ok(())
    }
}
