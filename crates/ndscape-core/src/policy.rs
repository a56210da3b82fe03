#![forbid(unsafe_code)]

//! Dimension policy tables.
//!
//! Raymarching and escape-time iteration get more expensive and less
//! stable as the ambient dimension grows. Each family that raymarches or
//! iterates has one exhaustive row per dimension in `3..=11`; there is no
//! interpolation, so a given `(family, dimension)` always yields the same
//! defaults.
//!
//! # Invariants
//!
//! 1. Every table has exactly `MAX_DIMENSION - MIN_DIMENSION + 1` rows.
//! 2. Down each table `max_iterations` never increases and
//!    `escape_radius` and `extent` never decrease.
//! 3. Families without dimension-dependent stability return one static
//!    row for every dimension.

use crate::dimension::{Dimension, MAX_DIMENSION, MIN_DIMENSION};
use crate::error::DomainError;
use crate::family::Family;

const ROWS: usize = MAX_DIMENSION - MIN_DIMENSION + 1;

/// Stability defaults for one family at one dimension.
///
/// Field meaning is family-specific where noted in each table: for the
/// black hole `max_iterations` is the raymarch step budget and
/// `thickness` the disk half-thickness; for Menger `max_iterations` is
/// the sponge depth; for Schrödinger it is the sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StabilityDefaults {
    pub escape_radius: f64,
    pub max_iterations: u32,
    pub extent: f64,
    pub thickness: f64,
}

const fn row(escape_radius: f64, max_iterations: u32, extent: f64) -> StabilityDefaults {
    StabilityDefaults {
        escape_radius,
        max_iterations,
        extent,
        thickness: 0.0,
    }
}

const fn disk_row(
    escape_radius: f64,
    max_iterations: u32,
    extent: f64,
    thickness: f64,
) -> StabilityDefaults {
    StabilityDefaults {
        escape_radius,
        max_iterations,
        extent,
        thickness,
    }
}

// ---------------------------------------------------------------------------
// Tables (row 0 = 3D, row 8 = 11D)
// ---------------------------------------------------------------------------

const MANDELBULB: [StabilityDefaults; ROWS] = [
    row(4.0, 80, 1.5),
    row(8.0, 50, 2.0),
    row(8.0, 50, 2.0),
    row(8.0, 50, 2.0),
    row(10.0, 40, 2.0),
    row(10.0, 40, 2.0),
    row(12.0, 35, 2.0),
    row(12.0, 35, 2.0),
    row(12.0, 35, 2.0),
];

const MANDELBOX: [StabilityDefaults; ROWS] = [
    row(10.0, 50, 3.0),
    row(12.0, 40, 3.5),
    row(12.0, 40, 3.5),
    row(12.0, 40, 3.5),
    row(16.0, 35, 4.0),
    row(16.0, 35, 4.0),
    row(20.0, 30, 4.5),
    row(20.0, 30, 4.5),
    row(20.0, 30, 4.5),
];

const KALI: [StabilityDefaults; ROWS] = [
    row(4.0, 30, 2.0),
    row(6.0, 24, 2.5),
    row(6.0, 24, 2.5),
    row(6.0, 24, 2.5),
    row(8.0, 20, 3.0),
    row(8.0, 20, 3.0),
    row(10.0, 16, 3.0),
    row(10.0, 16, 3.0),
    row(10.0, 16, 3.0),
];

const QUATERNION_JULIA: [StabilityDefaults; ROWS] = [
    row(4.0, 64, 1.5),
    row(8.0, 48, 2.0),
    row(8.0, 48, 2.0),
    row(8.0, 48, 2.0),
    row(10.0, 40, 2.0),
    row(10.0, 40, 2.0),
    row(12.0, 32, 2.0),
    row(12.0, 32, 2.0),
    row(12.0, 32, 2.0),
];

// Menger: max_iterations is the sponge recursion depth.
const MENGER: [StabilityDefaults; ROWS] = [
    row(2.0, 5, 1.5),
    row(2.0, 4, 2.0),
    row(2.0, 4, 2.0),
    row(2.0, 4, 2.0),
    row(2.0, 3, 2.0),
    row(2.0, 3, 2.0),
    row(2.0, 3, 2.0),
    row(2.0, 3, 2.0),
    row(2.0, 3, 2.0),
];

// Schrödinger: escape_radius is the field cutoff, max_iterations the
// volume sample count.
const SCHROEDINGER: [StabilityDefaults; ROWS] = [
    row(6.0, 128, 4.0),
    row(7.0, 96, 4.5),
    row(7.0, 96, 4.5),
    row(7.0, 96, 4.5),
    row(8.0, 80, 5.0),
    row(8.0, 80, 5.0),
    row(9.0, 64, 5.0),
    row(9.0, 64, 5.0),
    row(9.0, 64, 5.0),
];

// Black hole: escape_radius is the far-field cutoff, max_iterations the
// raymarch step budget, thickness the disk half-thickness.
const BLACK_HOLE: [StabilityDefaults; ROWS] = [
    disk_row(40.0, 256, 30.0, 0.15),
    disk_row(50.0, 192, 35.0, 0.2),
    disk_row(50.0, 192, 35.0, 0.2),
    disk_row(50.0, 192, 35.0, 0.2),
    disk_row(60.0, 160, 40.0, 0.25),
    disk_row(60.0, 160, 40.0, 0.25),
    disk_row(70.0, 128, 40.0, 0.3),
    disk_row(70.0, 128, 40.0, 0.3),
    disk_row(70.0, 128, 40.0, 0.3),
];

const POLYTOPE_STATIC: StabilityDefaults = row(0.0, 0, 1.5);
const ROOT_SYSTEM_STATIC: StabilityDefaults = row(0.0, 0, 1.5);
const CLIFFORD_TORUS_STATIC: StabilityDefaults = row(0.0, 0, 3.0);
const NESTED_TORUS_STATIC: StabilityDefaults = row(0.0, 0, 3.0);

/// Look up the stability defaults for `family` at a validated dimension.
#[must_use]
pub fn policy_for_dimension(family: Family, dimension: Dimension) -> StabilityDefaults {
    let i = dimension.table_index();
    match family {
        Family::Polytope => POLYTOPE_STATIC,
        Family::RootSystem => ROOT_SYSTEM_STATIC,
        Family::CliffordTorus => CLIFFORD_TORUS_STATIC,
        Family::NestedTorus => NESTED_TORUS_STATIC,
        Family::Mandelbulb => MANDELBULB[i],
        Family::Mandelbox => MANDELBOX[i],
        Family::Kali => KALI[i],
        Family::QuaternionJulia => QUATERNION_JULIA[i],
        Family::Menger => MENGER[i],
        Family::Schroedinger => SCHROEDINGER[i],
        Family::BlackHole => BLACK_HOLE[i],
    }
}

/// Look up the stability defaults for `family` at a raw dimension.
///
/// Fails with [`DomainError`] outside `[3, 11]`.
pub fn policy_for(family: Family, dimension: usize) -> Result<StabilityDefaults, DomainError> {
    Dimension::new(dimension).map(|d| policy_for_dimension(family, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandelbulb_rows_match_published_values() {
        let expect = [
            (3, 4.0, 80),
            (4, 8.0, 50),
            (6, 8.0, 50),
            (7, 10.0, 40),
            (8, 10.0, 40),
            (9, 12.0, 35),
            (11, 12.0, 35),
        ];
        for (dim, escape, iterations) in expect {
            let p = policy_for(Family::Mandelbulb, dim).unwrap();
            assert_eq!(p.escape_radius, escape, "dim {dim}");
            assert_eq!(p.max_iterations, iterations, "dim {dim}");
        }
        assert_eq!(policy_for(Family::Mandelbulb, 9).unwrap().extent, 2.0);
    }

    #[test]
    fn out_of_range_dimension_is_domain_error() {
        assert_eq!(
            policy_for(Family::Kali, 2),
            Err(DomainError { dimension: 2 })
        );
        assert_eq!(
            policy_for(Family::BlackHole, 12),
            Err(DomainError { dimension: 12 })
        );
    }

    #[test]
    fn tables_are_monotonically_conservative() {
        for family in Family::ALL {
            let mut prev: Option<StabilityDefaults> = None;
            for dim in MIN_DIMENSION..=MAX_DIMENSION {
                let p = policy_for(family, dim).unwrap();
                if let Some(prev) = prev {
                    assert!(p.max_iterations <= prev.max_iterations, "{family} {dim}");
                    assert!(p.escape_radius >= prev.escape_radius, "{family} {dim}");
                    assert!(p.extent >= prev.extent, "{family} {dim}");
                    assert!(p.thickness >= prev.thickness, "{family} {dim}");
                }
                prev = Some(p);
            }
        }
    }

    #[test]
    fn static_families_ignore_dimension() {
        for family in Family::ALL.into_iter().filter(|f| !f.is_dimension_sensitive()) {
            let low = policy_for(family, 3).unwrap();
            let high = policy_for(family, 11).unwrap();
            assert_eq!(low, high, "{family}");
        }
    }
}
