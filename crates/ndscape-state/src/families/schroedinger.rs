#![forbid(unsafe_code)]

//! Schrödinger wavefunction density volumes.
//!
//! Two modes share one record: a superposition of harmonic-oscillator
//! eigenstates, and a single hydrogen orbital addressed by quantum numbers
//! `(n, l, m)`.
//!
//! # Invariants
//!
//! 1. `0 <= l <= n - 1` and `-l <= m <= l` after every mutation.
//! 2. Lowering `n` re-clamps `l`, then `m`.
//! 3. `fade_end - fade_start >= 0.05`.

use ndscape_core::{
    Bounds, Dimension, Family, OrderedPair, StabilityDefaults, ValidationError,
    policy_for_dimension,
};
use serde::{Deserialize, Serialize};

use crate::controller::{ConfigPatch, Controller, FamilyConfig, impl_slice_access};
use crate::slice::DimensionSlice;

pub const TERM_COUNT: Bounds = Bounds::new(1.0, 8.0);
pub const MAX_QUANTUM_NUMBER: Bounds = Bounds::new(1.0, 6.0);
pub const FREQUENCY_SPREAD: Bounds = Bounds::new(0.0, 0.5);
pub const TIME_SCALE: Bounds = Bounds::new(0.0, 2.0);
pub const FIELD_SCALE: Bounds = Bounds::new(0.5, 2.0);
pub const DENSITY_GAIN: Bounds = Bounds::new(0.1, 10.0);
pub const PRINCIPAL: Bounds = Bounds::new(1.0, 7.0);
pub const FADE: OrderedPair =
    OrderedPair::new(Bounds::new(0.0, 0.95), Bounds::new(0.05, 1.0), 0.05);
pub const SAMPLE_COUNT: Bounds = Bounds::new(16.0, 256.0);
pub const BOUNDING_RADIUS: Bounds = Bounds::new(2.0, 16.0);
pub const EXTENT: Bounds = Bounds::new(1.0, 8.0);
pub const PARAMETER_BOUNDS: Bounds = Bounds::new(-2.0, 2.0);

/// Density gain before the high-dimension boost.
pub const BASE_DENSITY_GAIN: f64 = 2.0;
const MAX_DENSITY_BOOST: f64 = 5.0;

/// Density falls off roughly geometrically with each extra axis; the
/// boost compensates from 5D upward.
#[must_use]
pub fn density_boost(dimension: Dimension) -> f64 {
    let d = dimension.get();
    if d <= 4 {
        1.0
    } else {
        (1.0 + (d - 4) as f64 * 0.4).min(MAX_DENSITY_BOOST)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuantumMode {
    #[default]
    HarmonicOscillator,
    HydrogenOrbital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorPalette {
    #[default]
    Phase,
    Density,
    Spectral,
    Monochrome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchroedingerConfig {
    pub slice: DimensionSlice,
    pub mode: QuantumMode,
    pub term_count: u32,
    pub max_quantum_number: u32,
    pub frequency_spread: f64,
    pub time_scale: f64,
    pub field_scale: f64,
    pub density_gain: f64,
    /// Principal quantum number `n`.
    pub principal: u32,
    /// Azimuthal quantum number `l`.
    pub azimuthal: u32,
    /// Magnetic quantum number `m`.
    pub magnetic: i32,
    pub fade_start: f64,
    pub fade_end: f64,
    pub palette: ColorPalette,
    pub sample_count: u32,
    pub bounding_radius: f64,
    pub extent: f64,
}

impl Default for SchroedingerConfig {
    fn default() -> Self {
        let policy = policy_for_dimension(Family::Schroedinger, Dimension::MIN);
        Self {
            slice: DimensionSlice::default(),
            mode: QuantumMode::default(),
            term_count: 3,
            max_quantum_number: 3,
            frequency_spread: 0.1,
            time_scale: 0.5,
            field_scale: 1.0,
            density_gain: BASE_DENSITY_GAIN,
            principal: 2,
            azimuthal: 1,
            magnetic: 0,
            fade_start: 0.6,
            fade_end: 0.95,
            palette: ColorPalette::default(),
            sample_count: policy.max_iterations,
            bounding_radius: policy.escape_radius,
            extent: policy.extent,
        }
    }
}

impl SchroedingerConfig {
    /// Re-clamp `l` into `[0, n-1]`, then `m` into `[-l, l]`.
    fn normalize_quantum_numbers(&mut self) {
        self.azimuthal = self.azimuthal.min(self.principal.saturating_sub(1));
        let l = self.azimuthal as i32;
        self.magnetic = self.magnetic.clamp(-l, l);
    }
}

impl FamilyConfig for SchroedingerConfig {
    const FAMILY: Family = Family::Schroedinger;
    const PARAMETER_BOUNDS: Bounds = PARAMETER_BOUNDS;
    type Patch = SchroedingerPatch;

    impl_slice_access!();

    fn apply_dimension(&mut self, dimension: Dimension, policy: StabilityDefaults) {
        self.sample_count = SAMPLE_COUNT.clamp_u32(policy.max_iterations);
        self.bounding_radius = BOUNDING_RADIUS.clamp(policy.escape_radius);
        self.extent = EXTENT.clamp(policy.extent);
        self.density_gain = DENSITY_GAIN.clamp(BASE_DENSITY_GAIN * density_boost(dimension));
    }
}

pub type SchroedingerController = Controller<SchroedingerConfig>;

impl Controller<SchroedingerConfig> {
    pub fn set_mode(&mut self, mode: QuantumMode) {
        self.commit(|c| c.mode = mode);
    }

    pub fn set_term_count(&mut self, count: u32) {
        self.commit(|c| c.term_count = TERM_COUNT.clamp_u32(count));
    }

    pub fn set_max_quantum_number(&mut self, n: u32) {
        self.commit(|c| c.max_quantum_number = MAX_QUANTUM_NUMBER.clamp_u32(n));
    }

    pub fn set_frequency_spread(&mut self, spread: f64) -> Result<(), ValidationError> {
        self.commit_scalar("frequency_spread", spread, |c, v| {
            c.frequency_spread = FREQUENCY_SPREAD.clamp(v);
        })
    }

    pub fn set_time_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("time_scale", scale, |c, v| c.time_scale = TIME_SCALE.clamp(v))
    }

    pub fn set_field_scale(&mut self, scale: f64) -> Result<(), ValidationError> {
        self.commit_scalar("field_scale", scale, |c, v| c.field_scale = FIELD_SCALE.clamp(v))
    }

    pub fn set_density_gain(&mut self, gain: f64) -> Result<(), ValidationError> {
        self.commit_scalar("density_gain", gain, |c, v| c.density_gain = DENSITY_GAIN.clamp(v))
    }

    /// Set `n`; `l` and `m` are pulled in if they no longer fit.
    pub fn set_principal(&mut self, n: u32) {
        self.commit(|c| {
            c.principal = PRINCIPAL.clamp_u32(n);
            c.normalize_quantum_numbers();
        });
    }

    /// Set `l`, clamped into `[0, n-1]`; `m` is pulled in if needed.
    pub fn set_azimuthal(&mut self, l: u32) {
        self.commit(|c| {
            c.azimuthal = l;
            c.normalize_quantum_numbers();
        });
    }

    /// Set `m`, clamped into `[-l, l]`.
    pub fn set_magnetic(&mut self, m: i32) {
        self.commit(|c| {
            c.magnetic = m;
            c.normalize_quantum_numbers();
        });
    }

    pub fn set_fade_start(&mut self, start: f64) -> Result<(), ValidationError> {
        self.commit_scalar("fade_start", start, |c, v| {
            (c.fade_start, c.fade_end) = FADE.set_low(v, c.fade_end);
        })
    }

    pub fn set_fade_end(&mut self, end: f64) -> Result<(), ValidationError> {
        self.commit_scalar("fade_end", end, |c, v| {
            (c.fade_start, c.fade_end) = FADE.set_high(c.fade_start, v);
        })
    }

    pub fn set_fade(&mut self, start: f64, end: f64) -> Result<(), ValidationError> {
        let start = ValidationError::check_finite("fade_start", start)?;
        self.commit_scalar("fade_end", end, |c, end| {
            (c.fade_start, c.fade_end) = FADE.set_both(start, end);
        })
    }

    pub fn set_palette(&mut self, palette: ColorPalette) {
        self.commit(|c| c.palette = palette);
    }

    pub fn set_sample_count(&mut self, count: u32) {
        self.commit(|c| c.sample_count = SAMPLE_COUNT.clamp_u32(count));
    }

    pub fn set_bounding_radius(&mut self, radius: f64) -> Result<(), ValidationError> {
        self.commit_scalar("bounding_radius", radius, |c, v| {
            c.bounding_radius = BOUNDING_RADIUS.clamp(v);
        })
    }

    pub fn set_extent(&mut self, extent: f64) -> Result<(), ValidationError> {
        self.commit_scalar("extent", extent, |c, v| c.extent = EXTENT.clamp(v))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchroedingerPatch {
    pub mode: Option<QuantumMode>,
    pub term_count: Option<u32>,
    pub max_quantum_number: Option<u32>,
    pub frequency_spread: Option<f64>,
    pub time_scale: Option<f64>,
    pub field_scale: Option<f64>,
    pub density_gain: Option<f64>,
    pub principal: Option<u32>,
    pub azimuthal: Option<u32>,
    pub magnetic: Option<i32>,
    pub fade_start: Option<f64>,
    pub fade_end: Option<f64>,
    pub palette: Option<ColorPalette>,
    pub sample_count: Option<u32>,
    pub bounding_radius: Option<f64>,
    pub extent: Option<f64>,
}

impl SchroedingerPatch {
    #[must_use]
    pub fn with_mode(mut self, mode: QuantumMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_term_count(mut self, count: u32) -> Self {
        self.term_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_max_quantum_number(mut self, n: u32) -> Self {
        self.max_quantum_number = Some(n);
        self
    }

    #[must_use]
    pub fn with_frequency_spread(mut self, spread: f64) -> Self {
        self.frequency_spread = Some(spread);
        self
    }

    #[must_use]
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_field_scale(mut self, scale: f64) -> Self {
        self.field_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_density_gain(mut self, gain: f64) -> Self {
        self.density_gain = Some(gain);
        self
    }

    /// Hydrogen orbital `(n, l, m)`.
    #[must_use]
    pub fn with_orbital(mut self, n: u32, l: u32, m: i32) -> Self {
        self.principal = Some(n);
        self.azimuthal = Some(l);
        self.magnetic = Some(m);
        self
    }

    #[must_use]
    pub fn with_fade(mut self, start: f64, end: f64) -> Self {
        self.fade_start = Some(start);
        self.fade_end = Some(end);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = Some(palette);
        self
    }

    #[must_use]
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = Some(count);
        self
    }

    #[must_use]
    pub fn with_bounding_radius(mut self, radius: f64) -> Self {
        self.bounding_radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }
}

impl From<&SchroedingerConfig> for SchroedingerPatch {
    fn from(c: &SchroedingerConfig) -> Self {
        Self {
            mode: Some(c.mode),
            term_count: Some(c.term_count),
            max_quantum_number: Some(c.max_quantum_number),
            frequency_spread: Some(c.frequency_spread),
            time_scale: Some(c.time_scale),
            field_scale: Some(c.field_scale),
            density_gain: Some(c.density_gain),
            principal: Some(c.principal),
            azimuthal: Some(c.azimuthal),
            magnetic: Some(c.magnetic),
            fade_start: Some(c.fade_start),
            fade_end: Some(c.fade_end),
            palette: Some(c.palette),
            sample_count: Some(c.sample_count),
            bounding_radius: Some(c.bounding_radius),
            extent: Some(c.extent),
        }
    }
}

impl ConfigPatch<SchroedingerConfig> for SchroedingerPatch {
    fn apply_to(&self, c: &mut SchroedingerController) -> Result<(), ValidationError> {
        if let Some(v) = self.mode {
            c.set_mode(v);
        }
        if let Some(v) = self.term_count {
            c.set_term_count(v);
        }
        if let Some(v) = self.max_quantum_number {
            c.set_max_quantum_number(v);
        }
        if let Some(v) = self.frequency_spread {
            c.set_frequency_spread(v)?;
        }
        if let Some(v) = self.time_scale {
            c.set_time_scale(v)?;
        }
        if let Some(v) = self.field_scale {
            c.set_field_scale(v)?;
        }
        if let Some(v) = self.density_gain {
            c.set_density_gain(v)?;
        }
        // n before l before m: each bounds the next.
        if let Some(v) = self.principal {
            c.set_principal(v);
        }
        if let Some(v) = self.azimuthal {
            c.set_azimuthal(v);
        }
        if let Some(v) = self.magnetic {
            c.set_magnetic(v);
        }
        match (self.fade_start, self.fade_end) {
            (Some(start), Some(end)) => c.set_fade(start, end)?,
            (Some(start), None) => c.set_fade_start(start)?,
            (None, Some(end)) => c.set_fade_end(end)?,
            (None, None) => {}
        }
        if let Some(v) = self.palette {
            c.set_palette(v);
        }
        if let Some(v) = self.sample_count {
            c.set_sample_count(v);
        }
        if let Some(v) = self.bounding_radius {
            c.set_bounding_radius(v)?;
        }
        if let Some(v) = self.extent {
            c.set_extent(v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(d: usize) -> Dimension {
        Dimension::new(d).unwrap()
    }

    #[test]
    fn density_gain_boost_by_dimension() {
        assert_eq!(density_boost(dim(3)), 1.0);
        assert_eq!(density_boost(dim(4)), 1.0);
        assert!((density_boost(dim(5)) - 1.4).abs() < 1e-12);
        assert!((density_boost(dim(11)) - 3.8).abs() < 1e-12);

        let mut c = SchroedingerController::new();
        c.initialize_for_dimension(dim(6));
        assert!((c.config().density_gain - 3.6).abs() < 1e-12);
    }

    #[test]
    fn lowering_n_reclamps_l_then_m() {
        let mut c = SchroedingerController::new();
        c.set_principal(5);
        c.set_azimuthal(4);
        c.set_magnetic(-4);
        assert_eq!((c.config().azimuthal, c.config().magnetic), (4, -4));

        c.set_principal(2);
        let cfg = c.config();
        assert_eq!((cfg.principal, cfg.azimuthal, cfg.magnetic), (2, 1, -1));

        c.set_principal(0);
        let cfg = c.config();
        assert_eq!((cfg.principal, cfg.azimuthal, cfg.magnetic), (1, 0, 0));
    }

    #[test]
    fn azimuthal_and_magnetic_are_bounded() {
        let mut c = SchroedingerController::new();
        c.set_azimuthal(9);
        assert_eq!(c.config().azimuthal, 1);
        c.set_magnetic(3);
        assert_eq!(c.config().magnetic, 1);
        c.set_magnetic(i32::MIN);
        assert_eq!(c.config().magnetic, -1);
    }

    #[test]
    fn orbital_patch_applies_in_order() {
        let mut c = SchroedingerController::new();
        c.apply(&SchroedingerPatch::default().with_orbital(4, 3, -2)).unwrap();
        let cfg = c.config();
        assert_eq!((cfg.principal, cfg.azimuthal, cfg.magnetic), (4, 3, -2));
    }

    #[test]
    fn fade_pair_stays_ordered() {
        let mut c = SchroedingerController::new();
        c.set_fade_start(1.0).unwrap();
        assert!((c.config().fade_start - 0.9).abs() < 1e-12);
        assert_eq!(c.config().fade_end, 0.95);
        c.set_fade(0.2, 0.1).unwrap();
        let cfg = c.config();
        assert_eq!(cfg.fade_start, 0.2);
        assert!(cfg.fade_end - cfg.fade_start >= 0.05 - 1e-9);
    }

    #[test]
    fn policy_fields() {
        let c = SchroedingerController::for_dimension(dim(9));
        assert_eq!(c.config().sample_count, 64);
        assert_eq!(c.config().bounding_radius, 9.0);
        assert_eq!(c.config().extent, 5.0);
    }
}
