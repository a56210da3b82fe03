#![forbid(unsafe_code)]

//! The per-record view onto dimensions beyond the visualized three.
//!
//! Every family record embeds one [`DimensionSlice`]. Its
//! `parameter_values` always has exactly `dimension - 3` entries: the
//! cross-section offsets along the hidden axes.

use ndscape_core::{AxisSlot, Bounds, Dimension, IndexError, VisualizationAxes};
use serde::{Deserialize, Serialize};

/// Auxiliary coordinates and axis projection of one record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DimensionSlice {
    /// Dimension the record was last initialized for.
    pub dimension: Dimension,
    /// One value per hidden axis, in slot order.
    pub parameter_values: Vec<f64>,
    /// Coordinate indices projected to screen X/Y/Z.
    pub visualization_axes: VisualizationAxes,
}

impl DimensionSlice {
    /// Zero-filled slice for `dimension`.
    #[must_use]
    pub fn for_dimension(dimension: Dimension) -> Self {
        let mut slice = Self::default();
        slice.resize(dimension);
        slice
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameter_values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameter_values.is_empty()
    }

    /// Track `dimension`: grow with zeros or truncate, keeping values by
    /// position.
    pub fn resize(&mut self, dimension: Dimension) {
        self.dimension = dimension;
        self.parameter_values.resize(dimension.extra_axes(), 0.0);
    }

    /// Clamp `value` into `bounds` and store it at `index`.
    pub fn set(&mut self, index: usize, value: f64, bounds: Bounds) -> Result<(), IndexError> {
        let len = self.parameter_values.len();
        let slot = self
            .parameter_values
            .get_mut(index)
            .ok_or(IndexError { index, len })?;
        *slot = bounds.clamp(value);
        Ok(())
    }

    /// Zero every auxiliary value.
    pub fn zero(&mut self) {
        self.parameter_values.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn set_axis(&mut self, slot: AxisSlot, axis: usize) {
        self.visualization_axes = self.visualization_axes.with(slot, axis);
    }

    /// Copy values from `other` by position, clamped into `bounds`.
    ///
    /// This slice's length is kept; surplus values in `other` are dropped
    /// and missing ones stay as they are.
    pub fn copy_values_from(&mut self, other: &DimensionSlice, bounds: Bounds) {
        for (dst, src) in self.parameter_values.iter_mut().zip(&other.parameter_values) {
            if src.is_finite() {
                *dst = bounds.clamp(*src);
            }
        }
    }
}
