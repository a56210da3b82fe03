#![forbid(unsafe_code)]

//! Kerr black hole with a thin accretion disk.
//!
//! The user tunes the horizon radius and the spin; the Kerr radii
//! ([`KerrDerived`]) are recomputed from both on every change of either,
//! and the disk inner edge and photon shell are re-derived from them as
//! multiples of the event horizon.
//!
//! # Invariants
//!
//! 1. `kerr == compute_kerr_radii(horizon_radius / 2, spin)`.
//! 2. `disk_outer_radius_mul - disk_inner_radius_mul >= 0.1`.
//! 3. The disk outer edge lies at least 0.1 horizon radii outside the
//!    prograde ISCO, so
//!    `event_horizon < photon_sphere_prograde < isco_prograde < outer edge`.
//! 4. `photon_shell_radius_mul ∈ [1, 2]`.
//! 5. `disk_color == disk_temperature_to_color(disk_temperature)`.

use ndscape_core::{
    Bounds, Dimension, Family, KerrDerived, MAX_SPIN, OrderedPair, StabilityDefaults,
    ValidationError, compute_kerr_radii, disk_temperature_to_color, normalize_angle_deg,
    policy_for_dimension,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

/// Schwarzschild radius `2M` of the non-spinning hole.
pub const HORIZON_RADIUS: Bounds = Bounds::new(0.5, 20.0);
pub const SPIN: Bounds = Bounds::new(0.0, MAX_SPIN);
/// Disk edges as multiples of the event horizon radius.
pub const DISK_RADII: OrderedPair =
    OrderedPair::new(Bounds::new(1.0, 20.0), Bounds::new(1.1, 50.0), 0.1);
pub const PHOTON_SHELL_RADIUS_MUL: Bounds = Bounds::new(1.0, 2.0);
pub const DISK_TEMPERATURE: Bounds =
    Bounds::new(ndscape_core::blackbody::MIN_KELVIN, ndscape_core::blackbody::MAX_KELVIN);
pub const LENSING_STRENGTH: Bounds = Bounds::new(0.0, 5.0);
pub const DOPPLER_STRENGTH: Bounds = Bounds::new(0.0, 2.0);
pub const MAX_STEPS: Bounds = Bounds::new(32.0, 512.0);
pub const FAR_RADIUS: Bounds = Bounds::new(10.0, 100.0);
pub const EXTENT: Bounds = Bounds::new(5.0, 60.0);
pub const DISK_THICKNESS: Bounds = Bounds::new(0.01, 1.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

pub const DEFAULT_HORIZON_RADIUS: f64 = 2.0;
pub const DEFAULT_DISK_TEMPERATURE: f64 = 6500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlackHoleConfig {
    pub slice: DimensionSlice,
    pub horizon_radius: f64,
    pub spin: f64,
    pub disk_inner_radius_mul: f64,
    pub disk_outer_radius_mul: f64,
    pub photon_shell_radius_mul: f64,
    /// Derived from `horizon_radius` and `spin`.
    pub kerr: KerrDerived,
    pub disk_temperature: f64,
    /// Derived `#rrggbb` of `disk_temperature`.
    pub disk_color: String,
    pub lensing_strength: f64,
    pub doppler_strength: f64,
    pub disk_tilt_deg: f64,
    pub max_steps: u32,
    pub far_radius: f64,
    pub extent: f64,
    pub disk_thickness: f64,
}

impl Default for BlackHoleConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::BlackHole, Dimension::MIN);
        let mut config = Self {
            slice: DimensionSlice::default(),
            horizon_radius: DEFAULT_HORIZON_RADIUS,
            spin: 0.0,
            disk_inner_radius_mul: DISK_RADII.low.min,
            disk_outer_radius_mul: 12.0,
            photon_shell_radius_mul: PHOTON_SHELL_RADIUS_MUL.min,
            kerr: KerrDerived::default(),
            disk_temperature: DEFAULT_DISK_TEMPERATURE,
            disk_color: disk_temperature_to_color(DEFAULT_DISK_TEMPERATURE),
            lensing_strength: 1.0,
            doppler_strength: 1.0,
            disk_tilt_deg: 0.0,
            max_steps: policy.max_iterations,
            far_radius: policy.escape_radius,
            extent: policy.extent,
            disk_thickness: policy.thickness,
        };
        config.derive_kerr();
        config
    }
}

impl BlackHoleConfig {
    /// Mass in geometric units, `horizon_radius / 2`.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.horizon_radius / 2.0
    }

    /// Recompute the Kerr radii and the disk geometry that hangs off them.
    fn derive_kerr(&mut self) {
        self.kerr = compute_kerr_radii(self.mass(), self.spin);
        let horizon = self.kerr.event_horizon_radius;
        let inner = self.kerr.isco_prograde / horizon;
        let photon = self.kerr.photon_sphere_prograde / horizon;

        self.disk_inner_radius_mul = DISK_RADII.low.clamp(inner);
        self.floor_disk_outer_radius();
        self.photon_shell_radius_mul = PHOTON_SHELL_RADIUS_MUL.clamp(photon);
        trace!(
            mass = self.kerr.mass,
            spin = self.kerr.spin,
            event_horizon = horizon,
            isco = self.kerr.isco_prograde,
            "re-derived kerr radii"
        );
    }

    /// Lowest outer multiplier the disk may have: one gap past both the
    /// inner edge and the prograde ISCO.
    pub fn min_disk_outer_radius_mul(&self) -> f64 {
        let isco = self.kerr.isco_prograde / self.kerr.event_horizon_radius;
        isco.max(self.disk_inner_radius_mul) + DISK_RADII.min_gap
    }

    /// Push the outer edge up to [`Self::min_disk_outer_radius_mul`].
    fn floor_disk_outer_radius(&mut self) {
        let floor = self.min_disk_outer_radius_mul();
        self.disk_outer_radius_mul = DISK_RADII.high.clamp(self.disk_outer_radius_mul.max(floor));
    }
}

impl FamilyConfig for BlackHoleConfig {
    const FAMILY: Family = Family::BlackHole;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = BlackHolePatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, _dimension: Dimension, policy: StabilityDefaults) {
        self.max_steps = MAX_STEPS.clamp_u32(policy.max_iterations);
        self.far_radius = FAR_RADIUS.clamp(policy.escape_radius);
        self.extent = EXTENT.clamp(policy.extent);
        self.disk_thickness = DISK_THICKNESS.clamp(policy.thickness);
    }
}

pub type BlackHoleController = Controller<BlackHoleConfig>;

impl Controller<BlackHoleConfig> {
    /// Set the horizon radius; the Kerr radii are recomputed with the
    /// current spin.
    pub fn set_horizon_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("horizon_radius", radius, |c, v| {
            c.horizon_radius = HORIZON_RADIUS.clamp(v);
            c.derive_kerr();
        })
    }

    /// Set the dimensionless spin `a/M`; the Kerr radii are recomputed
    /// with the current horizon radius.
    pub fn set_spin(&mut self, spin: f64) -> Result<(), ValidationError> {
        self.commit_scalar("spin", spin, |c, v| {
            c.spin = SPIN.clamp(v);
            c.derive_kerr();
        })
    }

    pub fn set_disk_inner_radius_mul(&mut self, mul: f64) -> Result<(), ValidationError> {
        self.commit_scalar("disk_inner_radius_mul", mul, |c, v| {
            (c.disk_inner_radius_mul, c.disk_outer_radius_mul) =
                DISK_RADII.set_low(v, c.disk_outer_radius_mul);
        })
    }

    pub fn set_disk_outer_radius_mul(&mut self, mul: f64) -> Result<(), ValidationError> {
        self.commit_scalar("disk_outer_radius_mul", mul, |c, v| {
            (c.disk_inner_radius_mul, c.disk_outer_radius_mul) =
                DISK_RADII.set_high(c.disk_inner_radius_mul, v);
            c.floor_disk_outer_radius();
        })
    }

    pub fn set_disk_radii(&mut self, inner: f64, outer: f64) -> Result<(), ValidationError> {
        let inner = ValidationError::check_finite("disk_inner_radius_mul", inner)?;
        self.commit_scalar("disk_outer_radius_mul", outer, |c, outer| {
            (c.disk_inner_radius_mul, c.disk_outer_radius_mul) = DISK_RADII.set_both(inner, outer);
            c.floor_disk_outer_radius();
        })
    }

    pub fn set_photon_shell_radius_mul(&mut self, mul: f64) -> Result<(), ValidationError> {
        self.commit_scalar("photon_shell_radius_mul", mul, |c, v| {
            c.photon_shell_radius_mul = PHOTON_SHELL_RADIUS_MUL.clamp(v);
        })
    }

    /// Set the disk temperature; the disk color follows.
    pub fn set_disk_temperature(&mut self, kelvin: f64) -> Result<(), ValidationError> {
        self.commit_scalar("disk_temperature", kelvin, |c, v| {
            c.disk_temperature = DISK_TEMPERATURE.clamp(v);
            c.disk_color = disk_temperature_to_color(c.disk_temperature);
        })
    }

    pub fn set_lensing_strength(&mut self, strength: f64) -> Result<(), ValidationError> {
        self.commit_scalar("lensing_strength", strength, |c, v| {
            c.lensing_strength = LENSING_STRENGTH.clamp(v);
        })
    }

    pub fn set_doppler_strength(&mut self, strength: f64) -> Result<(), ValidationError> {
        self.commit_scalar("doppler_strength", strength, |c, v| {
            c.doppler_strength = DOPPLER_STRENGTH.clamp(v);
        })
    }

    /// Tilt in degrees, wrapped into `[0, 360)`.
    pub fn set_disk_tilt_deg(&mut self, degrees: f64) -> Result<(), ValidationError> {
        self.commit_scalar("disk_tilt_deg", degrees, |c, v| {
            c.disk_tilt_deg = normalize_angle_deg(v);
        })
    }

    pub fn set_max_steps(&mut self, steps: u32) {
        self.commit(|c| c.max_steps = MAX_STEPS.clamp_u32(steps));
    }

    pub fn set_far_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("far_radius", radius, |c, v| c.far_radius = FAR_RADIUS.clamp(v))
    }

    pub fn set_extent(&mut self, extent: f64) -> Result<(), ValidationError> {
        self.commit_scalar("extent", extent, |c, v| c.extent = EXTENT.clamp(v))
    }

    pub fn set_disk_thickness(&mut self, thickness: f64) -> Result<(), ValidationError> {
        self.commit_scalar("disk_thickness", thickness, |c, v| {
            c.disk_thickness = DISK_THICKNESS.clamp(v);
        })
    }
}

/// Partial black-hole update.
///
/// Horizon and spin are applied first so that explicitly supplied disk and
/// photon-shell multipliers win over the values derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlackHolePatch {
    pub horizon_radius: Option<f64>,
    pub spin: Option<f64>,
    pub disk_inner_radius_mul: Option<f64>,
    pub disk_outer_radius_mul: Option<f64>,
    pub photon_shell_radius_mul: Option<f64>,
    pub disk_temperature: Option<f64>,
    pub lensing_strength: Option<f64>,
    pub doppler_strength: Option<f64>,
    pub disk_tilt_deg: Option<f64>,
    pub max_steps: Option<u32>,
    pub far_radius: Option<f64>,
    pub extent: Option<f64>,
    pub disk_thickness: Option<f64>,
}

impl BlackHolePatch {
    #[must_use]
    pub fn with_horizon_radius(mut self, radius: f64) -> Self {
        self.horizon_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = Some(spin);
        self
    }

    #[must_use]
    pub fn with_disk_radii(mut self, inner: f64, outer: f64) -> Self {
        self.disk_inner_radius_mul = Some(inner);
        self.disk_outer_radius_mul = Some(outer);
        self
    }

    #[must_use]
    pub fn with_disk_inner_radius_mul(mut self, mul: f64) -> Self {
        self.disk_inner_radius_mul = Some(mul);
        self
    }

    #[must_use]
    pub fn with_disk_outer_radius_mul(mut self, mul: f64) -> Self {
        self.disk_outer_radius_mul = Some(mul);
        self
    }

    #[must_use]
    pub fn with_photon_shell_radius_mul(mut self, mul: f64) -> Self {
        self.photon_shell_radius_mul = Some(mul);
        self
    }

    #[must_use]
    pub fn with_disk_temperature(mut self, kelvin: f64) -> Self {
        self.disk_temperature = Some(kelvin);
        self
    }

    #[must_use]
    pub fn with_lensing_strength(mut self, strength: f64) -> Self {
        self.lensing_strength = Some(strength);
        self
    }

    #[must_use]
    pub fn with_doppler_strength(mut self, strength: f64) -> Self {
        self.doppler_strength = Some(strength);
        self
    }

    #[must_use]
    pub fn with_disk_tilt_deg(mut self, degrees: f64) -> Self {
        self.disk_tilt_deg = Some(degrees);
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, steps: u32) -> Self {
        self.max_steps = Some(steps);
        self
    }

    #[must_use]
    pub fn with_far_radius(mut self, radius: f64) -> Self {
        self.far_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }

    #[must_use]
    pub fn with_disk_thickness(mut self, thickness: f64) -> Self {
        self.disk_thickness = Some(thickness);
        self
    }
}

impl From<&BlackHoleConfig> for BlackHolePatch {
    fn from(c: &BlackHoleConfig) -> Self {
        Self {
            horizon_radius: Some(c.horizon_radius),
            spin: Some(c.spin),
            disk_inner_radius_mul: Some(c.disk_inner_radius_mul),
            disk_outer_radius_mul: Some(c.disk_outer_radius_mul),
            photon_shell_radius_mul: Some(c.photon_shell_radius_mul),
            disk_temperature: Some(c.disk_temperature),
            lensing_strength: Some(c.lensing_strength),
            doppler_strength: Some(c.doppler_strength),
            disk_tilt_deg: Some(c.disk_tilt_deg),
            max_steps: Some(c.max_steps),
            far_radius: Some(c.far_radius),
            extent: Some(c.extent),
            disk_thickness: Some(c.disk_thickness),
        }
    }
}

impl ConfigPatch<BlackHoleConfig> for BlackHolePatch {
    fn apply_to(&self, c: &mut BlackHoleController) -> Result<(), ValidationError> {
        if let Some(v) = self.horizon_radius {
            c.set_horizon_radius(v)?;
        }
        if let Some(v) = self.spin {
            c.set_spin(v)?;
        }
        match (self.disk_inner_radius_mul, self.disk_outer_radius_mul) {
            (Some(inner), Some(outer)) => c.set_disk_radii(inner, outer)?,
            (Some(inner), None) => c.set_disk_inner_radius_mul(inner)?,
            (None, Some(outer)) => c.set_disk_outer_radius_mul(outer)?,
            (None, None) => {}
        }
        if let Some(v) = self.photon_shell_radius_mul {
            c.set_photon_shell_radius_mul(v)?;
        }
        if let Some(v) = self.disk_temperature {
            c.set_disk_temperature(v)?;
        }
        if let Some(v) = self.lensing_strength {
            c.set_lensing_strength(v)?;
        }
        if let Some(v) = self.doppler_strength {
            c.set_doppler_strength(v)?;
        }
        if let Some(v) = self.disk_tilt_deg {
            c.set_disk_tilt_deg(v)?;
        }
        if let Some(v) = self.max_steps {
            c.set_max_steps(v);
        }
        if let Some(v) = self.far_radius {
            c.set_far_radius(v)?;
        }
        if let Some(v) = self.extent {
            c.set_extent(v)?;
        }
        if let Some(v) = self.disk_thickness {
            c.set_disk_thickness(v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schwarzschild_defaults() {
        let c = BlackHoleController::new();
        let cfg = c.config();
        assert!((cfg.kerr.event_horizon_radius - 2.0).abs() < 1e-9);
        assert!((cfg.disk_inner_radius_mul - 3.0).abs() < 1e-9);
        assert!((cfg.photon_shell_radius_mul - 1.5).abs() < 1e-9);
        assert_eq!(cfg.disk_outer_radius_mul, 12.0);
        assert_eq!(cfg.disk_color, disk_temperature_to_color(6500.0));
    }

    #[test]
    fn horizon_then_spin_keeps_horizon() {
        let mut c = BlackHoleController::new();
        c.set_horizon_radius(10.0).unwrap();
        c.set_spin(0.0).unwrap();
        let cfg = c.config();
        assert_eq!(cfg.kerr.event_horizon_radius, 10.0);
        assert!(PHOTON_SHELL_RADIUS_MUL.contains(cfg.photon_shell_radius_mul));
    }

    #[test]
    fn spin_recomputes_with_current_horizon() {
        let mut c = BlackHoleController::new();
        c.set_horizon_radius(8.0).unwrap();
        c.set_spin(0.9).unwrap();
        let cfg = c.config();
        assert_eq!(cfg.kerr, compute_kerr_radii(4.0, 0.9));
        assert!(cfg.kerr.event_horizon_radius < 8.0);
        assert!(cfg.disk_inner_radius_mul < 3.0);
        assert!(cfg.photon_shell_radius_mul < 1.5);
    }

    #[test]
    fn spin_is_capped() {
        let mut c = BlackHoleController::new();
        c.set_spin(1.5).unwrap();
        assert_eq!(c.config().spin, MAX_SPIN);
        assert!(c.config().kerr.event_horizon_radius.is_finite());
    }

    #[test]
    fn inner_radius_pulled_below_outer() {
        let mut c = BlackHoleController::new();
        c.set_disk_outer_radius_mul(5.0).unwrap();
        c.set_disk_inner_radius_mul(999.0).unwrap();
        let cfg = c.config();
        assert_eq!(cfg.disk_inner_radius_mul, 4.9);
        assert_eq!(cfg.disk_outer_radius_mul, 5.0);
    }

    #[test]
    fn adversarial_outer_then_inner() {
        let mut c = BlackHoleController::new();
        c.set_disk_outer_radius_mul(0.0).unwrap();
        c.set_disk_inner_radius_mul(100.0).unwrap();
        let cfg = c.config();
        assert!(cfg.disk_inner_radius_mul < cfg.disk_outer_radius_mul);
        assert!(DISK_RADII.is_ordered(cfg.disk_inner_radius_mul, cfg.disk_outer_radius_mul));
    }

    #[test]
    fn outer_radius_cannot_enter_the_isco() {
        let mut c = BlackHoleController::new();
        c.set_disk_inner_radius_mul(1.0).unwrap();
        c.set_disk_outer_radius_mul(1.1).unwrap();
        let cfg = c.config();
        let outer = cfg.disk_outer_radius_mul * cfg.kerr.event_horizon_radius;
        assert!(cfg.kerr.isco_prograde < outer);
        assert!(cfg.kerr.photon_sphere_prograde < outer);
        assert!((cfg.disk_outer_radius_mul - 3.1).abs() < 1e-9);
    }

    #[test]
    fn disk_radii_pair_respects_isco_floor() {
        let mut c = BlackHoleController::new();
        c.set_spin(0.3).unwrap();
        c.set_disk_radii(1.0, 1.2).unwrap();
        let cfg = c.config();
        assert_eq!(cfg.disk_inner_radius_mul, 1.0);
        assert_eq!(cfg.disk_outer_radius_mul, cfg.min_disk_outer_radius_mul());
        assert!(cfg.kerr.isco_prograde < cfg.disk_outer_radius_mul * cfg.kerr.event_horizon_radius);
    }

    #[test]
    fn restore_lifts_outer_radius_inside_isco() {
        let mut record = BlackHoleConfig::default();
        record.disk_inner_radius_mul = 1.0;
        record.disk_outer_radius_mul = 1.5;
        let mut c = BlackHoleController::new();
        c.restore(&record).unwrap();
        let cfg = c.config();
        assert!(cfg.kerr.isco_prograde < cfg.disk_outer_radius_mul * cfg.kerr.event_horizon_radius);
    }

    #[test]
    fn derived_inner_pushes_outer_up() {
        let mut c = BlackHoleController::new();
        c.set_disk_radii(1.0, 1.1).unwrap();
        c.set_spin(0.0).unwrap();
        let cfg = c.config();
        assert!((cfg.disk_inner_radius_mul - 3.0).abs() < 1e-9);
        assert!(cfg.disk_outer_radius_mul >= cfg.disk_inner_radius_mul + 0.1 - 1e-9);
    }

    #[test]
    fn temperature_drives_color() {
        let mut c = BlackHoleController::new();
        c.set_disk_temperature(1500.0).unwrap();
        assert_eq!(c.config().disk_color, disk_temperature_to_color(1500.0));
        c.set_disk_temperature(1.0e6).unwrap();
        assert_eq!(c.config().disk_temperature, 40000.0);
    }

    #[test]
    fn tilt_wraps() {
        let mut c = BlackHoleController::new();
        c.set_disk_tilt_deg(-30.0).unwrap();
        assert_eq!(c.config().disk_tilt_deg, 330.0);
    }

    #[test]
    fn policy_fields_follow_dimension() {
        let c = BlackHoleController::for_dimension(Dimension::new(11).unwrap());
        let cfg = c.config();
        assert_eq!(cfg.max_steps, 128);
        assert_eq!(cfg.far_radius, 70.0);
        assert_eq!(cfg.extent, 40.0);
        assert_eq!(cfg.disk_thickness, 0.3);
    }

    #[test]
    fn restore_reproduces_explicit_multipliers() {
        let mut c = BlackHoleController::new();
        c.set_spin(0.5).unwrap();
        c.set_photon_shell_radius_mul(1.9).unwrap();
        c.set_disk_radii(7.0, 30.0).unwrap();
        let record = c.config().clone();

        let mut fresh = BlackHoleController::new();
        fresh.restore(&record).unwrap();
        assert_eq!(fresh.config(), &record);
    }
}
