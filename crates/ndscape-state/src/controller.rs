#![forbid(unsafe_code)]

//! Copy-on-publish controller shared by every geometry family.
//!
//! A [`Controller`] owns one family record behind an [`Arc`]. Every
//! mutator clones the current record, edits the clone, and replaces the
//! `Arc` in a single assignment. Readers holding an earlier
//! [`Controller::snapshot`] keep seeing the complete previous record.
//!
//! Family modules add their field setters as inherent methods on the
//! concrete `Controller<FooConfig>`; the operations common to all
//! families (dimension changes, auxiliary parameters, axes, reset, bulk
//! patching) live here.
//!
//! # Invariants
//!
//! 1. `config().slice().len() == config().slice().dimension.extra_axes()`.
//! 2. A mutator either commits a fully valid record or commits nothing.
//! 3. Bulk [`Controller::apply`] stages every field on a copy and publishes
//!    once, so a failing patch leaves the controller untouched.

use std::sync::Arc;

use ndscape_core::{
    AxisSlot, Bounds, Dimension, Family, IndexError, StabilityDefaults, ValidationError,
    VisualizationAxes, policy_for_dimension,
};
use tracing::{debug, trace};

use crate::slice::DimensionSlice;

/// A family configuration record.
pub trait FamilyConfig: Clone + Default + Send + Sync + 'static {
    /// The family this record configures.
    const FAMILY: Family;
    /// Clamp range for auxiliary parameter values.
    const PARAMETER_BOUNDS: Bounds;
    /// Partial update builder for this record.
    type Patch: ConfigPatch<Self>;

    fn slice(&self) -> &DimensionSlice;
    fn slice_mut(&mut self) -> &mut DimensionSlice;

    /// Re-derive dimension-dependent fields. Called after the slice has
    /// been resized to `dimension`.
    fn apply_dimension(&mut self, dimension: Dimension, policy: StabilityDefaults);
}

/// A partial update that funnels each present field through the
/// controller's validating setters.
pub trait ConfigPatch<C: FamilyConfig>: for<'a> From<&'a C> {
    fn apply_to(&self, controller: &mut Controller<C>) -> Result<(), ValidationError>;
}

/// Owner of one family record.
#[derive(Debug, Clone)]
pub struct Controller<C> {
    config: Arc<C>,
}

impl<C: FamilyConfig> Default for Controller<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FamilyConfig> Controller<C> {
    /// Defaults initialized for 3D.
    #[must_use]
    pub fn new() -> Self {
        Self::for_dimension(Dimension::MIN)
    }

    /// Defaults initialized for `dimension`.
    #[must_use]
    pub fn for_dimension(dimension: Dimension) -> Self {
        let mut controller = Self {
            config: Arc::new(C::default()),
        };
        controller.initialize_for_dimension(dimension);
        controller
    }

    /// The committed record.
    #[inline]
    pub fn config(&self) -> &C {
        &self.config
    }

    /// A shared handle to the committed record, for readers on another
    /// frame or thread.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<C> {
        Arc::clone(&self.config)
    }

    #[inline]
    pub fn family(&self) -> Family {
        C::FAMILY
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.config.slice().dimension
    }

    #[inline]
    pub fn parameter_values(&self) -> &[f64] {
        &self.config.slice().parameter_values
    }

    #[inline]
    pub fn visualization_axes(&self) -> VisualizationAxes {
        self.config.slice().visualization_axes
    }

    /// Publish an edited copy of the current record.
    pub(crate) fn commit(&mut self, edit: impl FnOnce(&mut C)) {
        let mut next = C::clone(&self.config);
        edit(&mut next);
        self.config = Arc::new(next);
    }

    /// Reject non-finite `value`, otherwise publish `edit(record, value)`.
    pub(crate) fn commit_scalar(
        &mut self,
        field: &'static str,
        value: f64,
        edit: impl FnOnce(&mut C, f64),
    ) -> Result<(), ValidationError> {
        let value = ValidationError::check_finite(field, value).inspect_err(|_| {
            trace!(family = C::FAMILY.name(), field, "rejected non-finite value");
        })?;
        self.commit(|config| edit(config, value));
        Ok(())
    }

    /// Resize the auxiliary vector to `dimension - 3` and re-apply the
    /// family's dimension policy.
    pub fn initialize_for_dimension(&mut self, dimension: Dimension) {
        let policy = policy_for_dimension(C::FAMILY, dimension);
        debug!(
            family = C::FAMILY.name(),
            dimension = dimension.get(),
            escape_radius = policy.escape_radius,
            max_iterations = policy.max_iterations,
            "initialize for dimension"
        );
        self.commit(|config| {
            config.slice_mut().resize(dimension);
            config.apply_dimension(dimension, policy);
        });
    }

    /// Set auxiliary parameter `index`, clamped into the family range.
    ///
    /// Fails when `index >= parameter_values().len()`; nothing is
    /// committed in that case. A non-finite value at a valid index is
    /// ignored.
    pub fn set_parameter_value(&mut self, index: usize, value: f64) -> Result<(), IndexError> {
        let len = self.config.slice().len();
        if index >= len {
            return Err(IndexError { index, len });
        }
        if !value.is_finite() {
            trace!(family = C::FAMILY.name(), index, "ignored non-finite parameter value");
            return Ok(());
        }
        let mut next = C::clone(&self.config);
        next.slice_mut().set(index, value, C::PARAMETER_BOUNDS)?;
        self.config = Arc::new(next);
        Ok(())
    }

    /// Zero the auxiliary vector, leaving every other field alone.
    pub fn reset_parameters(&mut self) {
        self.commit(|config| config.slice_mut().zero());
    }

    /// Point screen axis `slot` at coordinate `axis` (clamped to 0..=10).
    pub fn set_visualization_axis(&mut self, slot: AxisSlot, axis: usize) {
        self.commit(|config| config.slice_mut().set_axis(slot, axis));
    }

    pub fn set_visualization_axes(&mut self, axes: [usize; 3]) {
        self.commit(|config| config.slice_mut().visualization_axes = VisualizationAxes::new(axes));
    }

    /// Replace the record with defaults for the current dimension.
    pub fn reset(&mut self) {
        *self = Self::for_dimension(self.dimension());
    }

    /// Apply a partial update atomically.
    pub fn apply(&mut self, patch: &C::Patch) -> Result<(), ValidationError> {
        let mut staged = self.clone();
        patch.apply_to(&mut staged)?;
        *self = staged;
        Ok(())
    }

    /// Rebuild from `record`, re-validating every field.
    ///
    /// Starts from defaults for the record's dimension, applies every field
    /// through the setters, then copies the auxiliary values and axes.
    pub fn restore(&mut self, record: &C) -> Result<(), ValidationError> {
        let source = record.slice();
        let mut staged = Self::for_dimension(source.dimension);
        C::Patch::from(record).apply_to(&mut staged)?;
        staged.commit(|config| {
            let slice = config.slice_mut();
            slice.copy_values_from(source, C::PARAMETER_BOUNDS);
            slice.visualization_axes = VisualizationAxes::new(source.visualization_axes.as_array());
        });
        *self = staged;
        Ok(())
    }
}

/// Implement [`FamilyConfig`]'s slice accessors for a record with a
/// `slice` field.
macro_rules! impl_slice_access {
    () => {
        fn slice(&self) -> &$crate::slice::DimensionSlice {
            &self.slice
        }

        fn slice_mut(&mut self) -> &mut $crate::slice::DimensionSlice {
            &mut self.slice
        }
    };
}

pub(crate) use impl_slice_access;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::mandelbulb::{MandelbulbConfig, MandelbulbController};

    fn dim(d: usize) -> Dimension {
        Dimension::new(d).unwrap()
    }

    #[test]
    fn new_controller_is_three_dimensional() {
        let c = MandelbulbController::new();
        assert_eq!(c.dimension(), Dimension::MIN);
        assert!(c.parameter_values().is_empty());
    }

    #[test]
    fn snapshot_survives_later_mutation() {
        let mut c = MandelbulbController::for_dimension(dim(5));
        let before = c.snapshot();
        c.set_parameter_value(1, 1.25).unwrap();
        assert_eq!(before.slice.parameter_values, vec![0.0, 0.0]);
        assert_eq!(c.parameter_values(), &[0.0, 1.25]);
    }

    #[test]
    fn parameter_index_error_commits_nothing() {
        let mut c = MandelbulbController::for_dimension(dim(4));
        let before = c.snapshot();
        let err = c.set_parameter_value(1, 0.5).unwrap_err();
        assert_eq!(err, IndexError { index: 1, len: 1 });
        assert!(Arc::ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn non_finite_parameter_is_ignored() {
        let mut c = MandelbulbController::for_dimension(dim(4));
        c.set_parameter_value(0, 1.0).unwrap();
        c.set_parameter_value(0, f64::NAN).unwrap();
        assert_eq!(c.parameter_values(), &[1.0]);
    }

    #[test]
    fn reset_parameters_only_zeroes_vector() {
        let mut c = MandelbulbController::for_dimension(dim(6));
        c.set_power(11.0).unwrap();
        c.set_parameter_value(2, -1.0).unwrap();
        c.reset_parameters();
        assert_eq!(c.parameter_values(), &[0.0, 0.0, 0.0]);
        assert_eq!(c.config().power, 11.0);
    }

    #[test]
    fn initialize_twice_is_stable() {
        let mut c = MandelbulbController::for_dimension(dim(7));
        c.set_parameter_value(3, 0.75).unwrap();
        c.initialize_for_dimension(dim(7));
        assert_eq!(c.parameter_values(), &[0.0, 0.0, 0.0, 0.75]);
    }

    #[test]
    fn reset_keeps_dimension() {
        let mut c = MandelbulbController::for_dimension(dim(8));
        c.set_power(3.0).unwrap();
        c.reset();
        assert_eq!(c.dimension(), dim(8));
        assert_eq!(c.parameter_values().len(), 5);
        assert_eq!(c.config().power, MandelbulbConfig::default().power);
    }

    #[test]
    fn axes_are_clamped() {
        let mut c = MandelbulbController::new();
        c.set_visualization_axis(AxisSlot::Z, 50);
        assert_eq!(c.visualization_axes().as_array(), [0, 1, 10]);
        c.set_visualization_axes([3, 4, 5]);
        assert_eq!(c.visualization_axes().get(AxisSlot::Y), 4);
    }

    #[test]
    fn restore_round_trips_a_mutated_record() {
        let mut c = MandelbulbController::for_dimension(dim(6));
        c.set_power(12.5).unwrap();
        c.set_parameter_value(0, -1.5).unwrap();
        c.set_visualization_axis(AxisSlot::X, 4);
        let record = c.config().clone();

        let mut fresh = MandelbulbController::new();
        fresh.restore(&record).unwrap();
        assert_eq!(fresh.config(), &record);
    }
}
