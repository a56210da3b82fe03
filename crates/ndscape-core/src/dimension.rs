#![forbid(unsafe_code)]

//! Ambient dimension and visualization axis selection.
//!
//! [`Dimension`] can only hold values in `[MIN_DIMENSION, MAX_DIMENSION]`,
//! so every function that takes one is total. Raw `usize` input goes
//! through [`Dimension::new`] (strict) or [`Dimension::saturating`]
//! (clamped), or [`Dimension::resolve`] which picks between the two by
//! [`DomainMode`].

use crate::error::DomainError;

/// Smallest supported ambient dimension.
pub const MIN_DIMENSION: usize = 3;
/// Largest supported ambient dimension.
pub const MAX_DIMENSION: usize = 11;

/// A validated ambient dimension in `[3, 11]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct Dimension(usize);

impl Dimension {
    pub const MIN: Self = Self(MIN_DIMENSION);
    pub const MAX: Self = Self(MAX_DIMENSION);

    /// Validate `dimension`, failing outside `[3, 11]`.
    pub fn new(dimension: usize) -> Result<Self, DomainError> {
        if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            Ok(Self(dimension))
        } else {
            Err(DomainError { dimension })
        }
    }

    /// Clamp `dimension` into `[3, 11]`.
    #[must_use]
    pub fn saturating(dimension: usize) -> Self {
        Self(dimension.clamp(MIN_DIMENSION, MAX_DIMENSION))
    }

    /// Validate or clamp depending on `mode`.
    pub fn resolve(dimension: usize, mode: DomainMode) -> Result<Self, DomainError> {
        match mode {
            DomainMode::Strict => Self::new(dimension),
            DomainMode::Clamp => Ok(Self::saturating(dimension)),
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Number of coordinates beyond the three visualized axes.
    #[inline]
    #[must_use]
    pub const fn extra_axes(self) -> usize {
        self.0 - MIN_DIMENSION
    }

    /// Row index into a per-dimension policy table.
    #[inline]
    pub(crate) const fn table_index(self) -> usize {
        self.0 - MIN_DIMENSION
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<usize> for Dimension {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Dimension> for usize {
    fn from(value: Dimension) -> Self {
        value.0
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}D", self.0)
    }
}

/// How out-of-range dimensions are handled at the container boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DomainMode {
    /// Return a [`DomainError`]. Development default.
    Strict,
    /// Saturate into range. Release default.
    Clamp,
}

impl Default for DomainMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Clamp
        }
    }
}

/// One of the three screen axes a coordinate can be projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisSlot {
    X,
    Y,
    Z,
}

impl AxisSlot {
    pub const ALL: [AxisSlot; 3] = [AxisSlot::X, AxisSlot::Y, AxisSlot::Z];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AxisSlot::X => 0,
            AxisSlot::Y => 1,
            AxisSlot::Z => 2,
        }
    }
}

/// Which coordinate indices project to screen X/Y/Z.
///
/// Every index is kept in `[0, MAX_DIMENSION - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[usize; 3]", into = "[usize; 3]"))]
pub struct VisualizationAxes([usize; 3]);

impl VisualizationAxes {
    /// Build from raw indices, clamping each into range.
    #[must_use]
    pub fn new(axes: [usize; 3]) -> Self {
        Self(axes.map(|axis| axis.min(MAX_DIMENSION - 1)))
    }

    #[inline]
    #[must_use]
    pub fn get(&self, slot: AxisSlot) -> usize {
        self.0[slot.index()]
    }

    /// Point `slot` at `axis`, clamped into `[0, MAX_DIMENSION - 1]`.
    #[must_use]
    pub fn with(mut self, slot: AxisSlot, axis: usize) -> Self {
        self.0[slot.index()] = axis.min(MAX_DIMENSION - 1);
        self
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }
}

impl Default for VisualizationAxes {
    fn default() -> Self {
        Self([0, 1, 2])
    }
}

impl From<[usize; 3]> for VisualizationAxes {
    fn from(value: [usize; 3]) -> Self {
        Self::new(value)
    }
}

impl From<VisualizationAxes> for [usize; 3] {
    fn from(value: VisualizationAxes) -> Self {
        value.0
    }
}
