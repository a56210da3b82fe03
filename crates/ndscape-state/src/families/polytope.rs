#![forbid(unsafe_code)]

//! Uniform polytopes from a Wythoff construction.
//!
//! The record selects a Coxeter group and a Wythoff preset; the renderer
//! generates the vertices. Not every `(group, preset)` pair is
//! constructible, so the setters repair the pair instead of rejecting it.

use ndscape_core::{Bounds, Dimension, Family, StabilityDefaults, ValidationError};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const SCALE: Bounds = Bounds::new(0.1, 5.0);
pub const MAX_VERTICES: Bounds = Bounds::new(1000.0, 100_000.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

pub const DEFAULT_MAX_VERTICES: u32 = 40_000;

/// Coxeter group family: simplex (A), hypercube / cross-polytope (B), or
/// demicube (D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SymmetryGroup {
    A,
    #[default]
    B,
    D,
}

/// Which generator nodes of the Coxeter diagram are ringed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolytopePreset {
    #[default]
    Regular,
    Cross,
    Rectified,
    Truncated,
    Cantellated,
    Runcinated,
    Omnitruncated,
}

impl PolytopePreset {
    pub const ALL: [PolytopePreset; 7] = [
        Self::Regular,
        Self::Cross,
        Self::Rectified,
        Self::Truncated,
        Self::Cantellated,
        Self::Runcinated,
        Self::Omnitruncated,
    ];
}

impl SymmetryGroup {
    /// Smallest dimension the group is defined in.
    pub const fn min_dimension(self) -> usize {
        match self {
            Self::A | Self::B => 3,
            Self::D => 4,
        }
    }

    /// Whether the generator can build `preset` in this group.
    pub const fn supports(self, preset: PolytopePreset) -> bool {
        match self {
            Self::B => true,
            Self::A | Self::D => matches!(preset, PolytopePreset::Regular),
        }
    }

    /// `self` if it exists at `dimension`, otherwise [`SymmetryGroup::B`].
    pub fn available_at(self, dimension: Dimension) -> Self {
        if dimension.get() >= self.min_dimension() { self } else { Self::B }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolytopeConfig {
    pub slice: DimensionSlice,
    pub symmetry_group: SymmetryGroup,
    pub preset: PolytopePreset,
    pub scale: f64,
    /// Generation stops once this many vertices exist.
    pub max_vertices: u32,
}

impl Default for PolytopeConfig {
    fn default() -> Self {
        Self {
            slice: DimensionSlice::default(),
            symmetry_group: SymmetryGroup::default(),
            preset: PolytopePreset::default(),
            scale: 1.0,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }
}

impl FamilyConfig for PolytopeConfig {
    const FAMILY: Family = Family::Polytope;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = PolytopePatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, dimension: Dimension, _policy: StabilityDefaults) {
        self.symmetry_group = self.symmetry_group.available_at(dimension);
    }
}

pub type PolytopeController = Controller<PolytopeConfig>;

impl Controller<PolytopeConfig> {
    /// Select a group. D below 4D falls back to B; a preset the new group
    /// cannot build is reset to [`PolytopePreset::Regular`].
    pub fn set_symmetry_group(&mut self, group: SymmetryGroup) {
        let dimension = self.dimension();
        self.commit(|c| {
            c.symmetry_group = group.available_at(dimension);
            if !c.symmetry_group.supports(c.preset) {
                c.preset = PolytopePreset::Regular;
            }
        });
    }

    /// Select a preset, switching to group B if the current group cannot
    /// build it.
    pub fn set_preset(&mut self, preset: PolytopePreset) {
        self.commit(|c| {
            if !c.symmetry_group.supports(preset) {
                c.symmetry_group = SymmetryGroup::B;
            }
            c.preset = preset;
        });
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("scale", scale, |c, v| c.scale = SCALE.clamp(v))
    }

    pub fn set_max_vertices(&mut self, max: u32) {
        self.commit(|c| c.max_vertices = MAX_VERTICES.clamp_u32(max));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolytopePatch {
    pub symmetry_group: Option<SymmetryGroup>,
    pub preset: Option<PolytopePreset>,
    pub scale: Option<f64>,
    pub max_vertices: Option<u32>,
}

impl PolytopePatch {
    #[must_use]
    pub fn with_symmetry_group(mut self, group: SymmetryGroup) -> Self {
        self.symmetry_group = Some(group);
        self
    }

    #[must_use]
    pub fn with_preset(mut self, preset: PolytopePreset) -> Self {
        self.preset = Some(preset);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_max_vertices(mut self, max: u32) -> Self {
        self.max_vertices = Some(max);
        self
    }
}

impl From<&PolytopeConfig> for PolytopePatch {
    fn from(c: &PolytopeConfig) -> Self {
        Self {
            symmetry_group: Some(c.symmetry_group),
            preset: Some(c.preset),
            scale: Some(c.scale),
            max_vertices: Some(c.max_vertices),
        }
    }
}

impl ConfigPatch<PolytopeConfig> for PolytopePatch {
    fn apply_to(&self, c: &mut PolytopeController) -> Result<(), ValidationError> {
        if let Some(v) = self.symmetry_group {
            c.set_symmetry_group(v);
        }
        if let Some(v) = self.preset {
            c.set_preset(v);
        }
        if let Some(v) = self.scale {
            c.set_scale(v)?;
        }
        if let Some(v) = self.max_vertices {
            c.set_max_vertices(v);
        }
        Ok(())
    }
}
