#![forbid(unsafe_code)]

//! Invariant primitives shared by every family controller.
//!
//! Controllers never store a value they have not passed through one of
//! these helpers first. All functions are total over finite input; callers
//! reject NaN before reaching them (see [`ValidationError`]).
//!
//! # Invariants
//!
//! 1. `clamp(v, lo, hi)` lies in `[lo, hi]` whenever `lo <= hi`.
//! 2. After `ensure_ordered(a, b, gap, _)`, `b' - a' >= gap`.
//! 3. `snap_to_nearest` returns the first candidate at minimal distance.
//! 4. `normalize_angle_deg` lands in `[0, 360)`, `normalize_angle_rad` in
//!    `[-π, π)`.
//!
//! [`ValidationError`]: crate::error::ValidationError

use std::f64::consts::{PI, TAU};

/// Discrete grid resolutions offered by sampling selectors.
pub const RESOLUTION_OPTIONS: [u32; 7] = [16, 24, 32, 48, 64, 96, 128];

/// Clamp `value` into `[lo, hi]`.
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// A closed numeric range baked into a controller for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, self.min, self.max)
    }

    /// Clamp an integer-valued field. The bounds must be whole numbers.
    #[inline]
    pub fn clamp_u32(&self, value: u32) -> u32 {
        (value as f64).clamp(self.min, self.max) as u32
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Which member of an ordered pair the caller is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairEnd {
    /// The lower member (inner radius, fade start, power min).
    Low,
    /// The upper member (outer radius, fade end, power max).
    High,
}

/// Enforce `b - a >= min_gap` by moving only the end the caller touched.
///
/// Moving `a` above `b - min_gap` pulls `a` down; moving `b` below
/// `a + min_gap` pushes `b` up. The untouched end is returned unchanged.
#[inline]
pub fn ensure_ordered(a: f64, b: f64, min_gap: f64, moved: PairEnd) -> (f64, f64) {
    match moved {
        PairEnd::Low => (a.min(b - min_gap), b),
        PairEnd::High => (a, b.max(a + min_gap)),
    }
}

/// The field ranges and minimum gap of one ordered pair.
///
/// A pair is well-formed when `high.min >= low.min + min_gap` and
/// `low.max + min_gap <= high.max`; under that condition both setters
/// always land inside their own field range after ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedPair {
    pub low: Bounds,
    pub high: Bounds,
    pub min_gap: f64,
}

impl OrderedPair {
    pub const fn new(low: Bounds, high: Bounds, min_gap: f64) -> Self {
        Self { low, high, min_gap }
    }

    /// Move the low end to `value`; returns the committed `(low, high)`.
    pub fn set_low(&self, value: f64, high: f64) -> (f64, f64) {
        ensure_ordered(self.low.clamp(value), high, self.min_gap, PairEnd::Low)
    }

    /// Move the high end to `value`; returns the committed `(low, high)`.
    pub fn set_high(&self, low: f64, value: f64) -> (f64, f64) {
        ensure_ordered(low, self.high.clamp(value), self.min_gap, PairEnd::High)
    }

    /// Move both ends at once; returns the committed `(low, high)`.
    ///
    /// The low end is taken as requested (clamped) and the high end yields
    /// if the two would collide.
    pub fn set_both(&self, low: f64, high: f64) -> (f64, f64) {
        self.set_high(self.low.clamp(low), high)
    }

    /// Whether the ranges leave room for the gap at both extremes.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let eps = 1e-12;
        self.high.min + eps >= self.low.min + self.min_gap
            && self.low.max + self.min_gap <= self.high.max + eps
    }

    /// Whether `(low, high)` satisfies the pair's ordering.
    #[must_use]
    pub fn is_ordered(&self, low: f64, high: f64) -> bool {
        high - low >= self.min_gap - 1e-9
    }
}

/// Return the candidate with the smallest absolute distance to `value`.
///
/// Ties go to the earliest candidate. `None` only when `candidates` is
/// empty.
pub fn snap_to_nearest<T>(value: f64, candidates: &[T]) -> Option<T>
where
    T: Copy + Into<f64>,
{
    let mut best: Option<(T, f64)> = None;
    for &candidate in candidates {
        let distance = (candidate.into() - value).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle_deg(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap an angle in radians into `[-π, π)`.
#[inline]
pub fn normalize_angle_rad(angle: f64) -> f64 {
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped >= PI { -PI } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_both_ends() {
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn bounds_clamp_u32() {
        let b = Bounds::new(10.0, 500.0);
        assert_eq!(b.clamp_u32(3), 10);
        assert_eq!(b.clamp_u32(9000), 500);
        assert_eq!(b.clamp_u32(42), 42);
    }

    #[test]
    fn ensure_ordered_moves_only_touched_end() {
        assert_eq!(ensure_ordered(999.0, 5.0, 0.1, PairEnd::Low), (4.9, 5.0));
        assert_eq!(ensure_ordered(3.0, 0.0, 0.1, PairEnd::High), (3.0, 3.1));
        assert_eq!(ensure_ordered(1.0, 5.0, 0.1, PairEnd::Low), (1.0, 5.0));
    }

    #[test]
    fn ordered_pair_set_low_clamps_then_orders() {
        let pair = OrderedPair::new(Bounds::new(1.0, 20.0), Bounds::new(1.1, 50.0), 0.1);
        assert!(pair.is_well_formed());
        let (low, high) = pair.set_low(999.0, 5.0);
        assert!((low - 4.9).abs() < 1e-12);
        assert_eq!(high, 5.0);
        let (low, high) = pair.set_high(20.0, 0.0);
        assert_eq!(low, 20.0);
        assert!((high - 20.1).abs() < 1e-12);
    }

    #[test]
    fn ordered_pair_set_both_resolves_collisions() {
        let pair = OrderedPair::new(Bounds::new(0.1, 4.9), Bounds::new(0.2, 5.0), 0.1);
        assert_eq!(pair.set_both(4.0, 4.5), (4.0, 4.5));
        let (low, high) = pair.set_both(3.0, 1.0);
        assert_eq!(low, 3.0);
        assert!((high - 3.1).abs() < 1e-12);
    }

    #[test]
    fn ill_formed_pair_detected() {
        let pair = OrderedPair::new(Bounds::new(0.0, 10.0), Bounds::new(0.0, 10.0), 0.5);
        assert!(!pair.is_well_formed());
    }

    #[test]
    fn snap_picks_nearest_and_breaks_ties_first() {
        assert_eq!(snap_to_nearest(50.0, &RESOLUTION_OPTIONS), Some(48));
        assert_eq!(snap_to_nearest(20.0, &RESOLUTION_OPTIONS), Some(16));
        assert_eq!(snap_to_nearest(1.0e6, &RESOLUTION_OPTIONS), Some(128));
        assert_eq!(snap_to_nearest::<u32>(5.0, &[]), None);
    }

    #[test]
    fn degrees_wrap_into_half_open_range() {
        assert_eq!(normalize_angle_deg(360.0), 0.0);
        assert_eq!(normalize_angle_deg(-90.0), 270.0);
        assert_eq!(normalize_angle_deg(725.0), 5.0);
        assert!(normalize_angle_deg(-1e-18) < 360.0);
    }

    #[test]
    fn radians_wrap_into_half_open_range() {
        assert!((normalize_angle_rad(PI) + PI).abs() < 1e-12);
        assert!((normalize_angle_rad(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle_rad(0.5) - 0.5).abs() < 1e-12);
    }
}
