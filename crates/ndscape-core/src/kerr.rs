#![forbid(unsafe_code)]

//! Kerr black-hole radii in geometric units (`G = c = 1`).
//!
//! All radii are closed-form functions of the mass `M` and the
//! dimensionless spin `a = J / M²`:
//!
//! - outer event horizon `r+ = M + sqrt(M² - (aM)²)`
//! - innermost stable circular orbit (Bardeen, Press & Teukolsky 1972)
//!   `r = M (3 + Z2 ∓ sqrt((3 - Z1)(3 + Z1 + 2 Z2)))`
//! - circular photon orbit `r = 2M (1 + cos(2/3 · acos(∓a)))`
//!
//! The upper sign is the prograde branch.
//!
//! # Invariants
//!
//! 1. At `a = 0` the horizon is `2M`, both ISCOs are `6M` and both photon
//!    orbits are `3M` (Schwarzschild).
//! 2. Prograde radii shrink and retrograde radii grow as `a` increases.
//! 3. `r+ < photon_prograde < isco_prograde` for every `a < 1`.
//!
//! # Failure Modes
//!
//! - `a >= 1` has no horizon; spin is clamped to [`MAX_SPIN`].
//! - `M <= 0` is meaningless; mass is floored at [`MIN_MASS`].

/// Largest spin accepted; the Thorne limit for accreting black holes and
/// comfortably away from the extremal singularity at `a = 1`.
pub const MAX_SPIN: f64 = 0.998;

/// Mass floor applied to non-positive input.
pub const MIN_MASS: f64 = 1.0e-9;

/// Radii derived from `(mass, spin)`. Recomputed, never edited.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KerrDerived {
    pub mass: f64,
    pub spin: f64,
    pub event_horizon_radius: f64,
    pub isco_prograde: f64,
    pub isco_retrograde: f64,
    pub photon_sphere_prograde: f64,
    pub photon_sphere_retrograde: f64,
}

impl Default for KerrDerived {
    fn default() -> Self {
        compute_kerr_radii(1.0, 0.0)
    }
}

#[inline]
fn sanitize(mass: f64, spin: f64) -> (f64, f64) {
    (mass.max(MIN_MASS), spin.clamp(0.0, MAX_SPIN))
}

/// Outer horizon radius `M + sqrt(M² - (aM)²)`.
#[must_use]
pub fn event_horizon_radius(mass: f64, spin: f64) -> f64 {
    let (m, a) = sanitize(mass, spin);
    m + (m * m - (a * m) * (a * m)).max(0.0).sqrt()
}

fn isco(m: f64, a: f64, prograde: bool) -> f64 {
    let z1 = 1.0 + (1.0 - a * a).cbrt() * ((1.0 + a).cbrt() + (1.0 - a).cbrt());
    let z2 = (3.0 * a * a + z1 * z1).sqrt();
    let root = ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).max(0.0).sqrt();
    if prograde {
        m * (3.0 + z2 - root)
    } else {
        m * (3.0 + z2 + root)
    }
}

fn photon_orbit(m: f64, a: f64, prograde: bool) -> f64 {
    let signed = if prograde { -a } else { a };
    2.0 * m * (1.0 + ((2.0 / 3.0) * signed.acos()).cos())
}

/// Prograde ISCO radius.
#[must_use]
pub fn isco_prograde(mass: f64, spin: f64) -> f64 {
    let (m, a) = sanitize(mass, spin);
    isco(m, a, true)
}

/// Retrograde ISCO radius.
#[must_use]
pub fn isco_retrograde(mass: f64, spin: f64) -> f64 {
    let (m, a) = sanitize(mass, spin);
    isco(m, a, false)
}

/// Prograde circular photon orbit radius.
#[must_use]
pub fn photon_sphere_prograde(mass: f64, spin: f64) -> f64 {
    let (m, a) = sanitize(mass, spin);
    photon_orbit(m, a, true)
}

/// Retrograde circular photon orbit radius.
#[must_use]
pub fn photon_sphere_retrograde(mass: f64, spin: f64) -> f64 {
    let (m, a) = sanitize(mass, spin);
    photon_orbit(m, a, false)
}

/// Compute the full derived tuple for `(mass, spin)`.
#[must_use]
pub fn compute_kerr_radii(mass: f64, spin: f64) -> KerrDerived {
    let (m, a) = sanitize(mass, spin);
    KerrDerived {
        mass: m,
        spin: a,
        event_horizon_radius: event_horizon_radius(m, a),
        isco_prograde: isco(m, a, true),
        isco_retrograde: isco(m, a, false),
        photon_sphere_prograde: photon_orbit(m, a, true),
        photon_sphere_retrograde: photon_orbit(m, a, false),
    }
}
