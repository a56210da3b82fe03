//! Property-based invariant tests for the family controllers.
//!
//! 1. every clamped field stays in its range after any setter sequence
//! 2. set(get()) is a no-op for clamped fields
//! 3. ordered pairs keep their gap under any interleaving of set_low/set_high
//! 4. initialize_for_dimension always yields `d - 3` auxiliary values
//! 5. Kerr-derived fields stay consistent with horizon radius and spin, and
//!    the disk outer edge stays outside the prograde ISCO
//! 6. Schrödinger quantum numbers stay nested: l < n and |m| <= l
//! 7. auxiliary indices past the end fail and change nothing

use ndscape_core::compute_kerr_radii;
use ndscape_state::families::{
    black_hole, mandelbox, mandelbulb, nested_torus, schroedinger, BlackHoleController,
    MandelboxController, MandelbulbController, NestedTorusController, SchroedingerController,
};
use ndscape_state::{Dimension, Family, GeometryState, IndexError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum BulbOp {
    Power(f64),
    Iterations(u32),
    Escape(f64),
    Extent(f64),
    PowerMin(f64),
    PowerMax(f64),
    Speed(f64),
}

fn bulb_op() -> impl Strategy<Value = BulbOp> {
    prop_oneof![
        (-100.0f64..100.0).prop_map(BulbOp::Power),
        any::<u32>().prop_map(BulbOp::Iterations),
        (-100.0f64..100.0).prop_map(BulbOp::Escape),
        (-100.0f64..100.0).prop_map(BulbOp::Extent),
        (-100.0f64..100.0).prop_map(BulbOp::PowerMin),
        (-100.0f64..100.0).prop_map(BulbOp::PowerMax),
        (-10.0f64..10.0).prop_map(BulbOp::Speed),
    ]
}

#[derive(Debug, Clone)]
enum DiskOp {
    Horizon(f64),
    Spin(f64),
    Inner(f64),
    Outer(f64),
    Photon(f64),
}

fn disk_op() -> impl Strategy<Value = DiskOp> {
    prop_oneof![
        (-50.0f64..50.0).prop_map(DiskOp::Horizon),
        (-2.0f64..2.0).prop_map(DiskOp::Spin),
        (-1000.0f64..1000.0).prop_map(DiskOp::Inner),
        (-1000.0f64..1000.0).prop_map(DiskOp::Outer),
        (-10.0f64..10.0).prop_map(DiskOp::Photon),
    ]
}

proptest! {
    #[test]
    fn mandelbulb_fields_stay_in_range(ops in prop::collection::vec(bulb_op(), 1..40)) {
        let mut c = MandelbulbController::new();
        for op in ops {
            match op {
                BulbOp::Power(v) => c.set_power(v).unwrap(),
                BulbOp::Iterations(v) => c.set_max_iterations(v),
                BulbOp::Escape(v) => c.set_escape_radius(v).unwrap(),
                BulbOp::Extent(v) => c.set_extent(v).unwrap(),
                BulbOp::PowerMin(v) => c.set_power_min(v).unwrap(),
                BulbOp::PowerMax(v) => c.set_power_max(v).unwrap(),
                BulbOp::Speed(v) => c.set_power_speed(v).unwrap(),
            }
            let cfg = c.config();
            prop_assert!(mandelbulb::POWER.contains(cfg.power));
            prop_assert!(mandelbulb::MAX_ITERATIONS.contains(f64::from(cfg.max_iterations)));
            prop_assert!(mandelbulb::ESCAPE_RADIUS.contains(cfg.escape_radius));
            prop_assert!(mandelbulb::EXTENT.contains(cfg.extent));
            prop_assert!(mandelbulb::POWER_SPEED.contains(cfg.power_speed));
            prop_assert!(mandelbulb::POWER_RANGE.low.contains(cfg.power_min));
            prop_assert!(mandelbulb::POWER_RANGE.high.contains(cfg.power_max));
            prop_assert!(mandelbulb::POWER_RANGE.is_ordered(cfg.power_min, cfg.power_max));
        }
    }

    #[test]
    fn clamp_idempotence(power in -100.0f64..100.0, extent in -100.0f64..100.0) {
        let mut c = MandelbulbController::new();
        c.set_power(power).unwrap();
        c.set_extent(extent).unwrap();
        let before = c.config().clone();
        c.set_power(before.power).unwrap();
        c.set_extent(before.extent).unwrap();
        prop_assert_eq!(c.config(), &before);
    }

    #[test]
    fn black_hole_disk_and_kerr_consistent(ops in prop::collection::vec(disk_op(), 1..40)) {
        let mut c = BlackHoleController::new();
        for op in ops {
            match op {
                DiskOp::Horizon(v) => c.set_horizon_radius(v).unwrap(),
                DiskOp::Spin(v) => c.set_spin(v).unwrap(),
                DiskOp::Inner(v) => c.set_disk_inner_radius_mul(v).unwrap(),
                DiskOp::Outer(v) => c.set_disk_outer_radius_mul(v).unwrap(),
                DiskOp::Photon(v) => c.set_photon_shell_radius_mul(v).unwrap(),
            }
            let cfg = c.config();
            prop_assert!(black_hole::HORIZON_RADIUS.contains(cfg.horizon_radius));
            prop_assert!(black_hole::SPIN.contains(cfg.spin));
            prop_assert!(black_hole::DISK_RADII.low.contains(cfg.disk_inner_radius_mul));
            prop_assert!(black_hole::DISK_RADII.high.contains(cfg.disk_outer_radius_mul));
            prop_assert!(black_hole::DISK_RADII.is_ordered(
                cfg.disk_inner_radius_mul,
                cfg.disk_outer_radius_mul
            ));
            prop_assert!(black_hole::PHOTON_SHELL_RADIUS_MUL.contains(cfg.photon_shell_radius_mul));
            prop_assert_eq!(cfg.kerr, compute_kerr_radii(cfg.horizon_radius / 2.0, cfg.spin));
            let outer_edge = cfg.disk_outer_radius_mul * cfg.kerr.event_horizon_radius;
            prop_assert!(cfg.kerr.event_horizon_radius < cfg.kerr.photon_sphere_prograde);
            prop_assert!(cfg.kerr.photon_sphere_prograde < cfg.kerr.isco_prograde);
            prop_assert!(cfg.kerr.isco_prograde < outer_edge);
        }
    }

    #[test]
    fn mandelbox_fold_radii_ordered(
        ops in prop::collection::vec((any::<bool>(), -10.0f64..10.0), 1..50),
    ) {
        let mut c = MandelboxController::new();
        for (low, v) in ops {
            if low { c.set_min_radius(v).unwrap() } else { c.set_fixed_radius(v).unwrap() }
            let cfg = c.config();
            prop_assert!(mandelbox::FOLD_RADII.low.contains(cfg.min_radius));
            prop_assert!(mandelbox::FOLD_RADII.high.contains(cfg.fixed_radius));
            prop_assert!(mandelbox::FOLD_RADII.is_ordered(cfg.min_radius, cfg.fixed_radius));
        }
    }

    #[test]
    fn nested_torus_radii_ordered(
        ops in prop::collection::vec((any::<bool>(), -10.0f64..10.0), 1..50),
    ) {
        let mut c = NestedTorusController::new();
        for (inner, v) in ops {
            if inner { c.set_inner_radius(v).unwrap() } else { c.set_outer_radius(v).unwrap() }
            let cfg = c.config();
            prop_assert!(nested_torus::RADII.is_ordered(cfg.inner_radius, cfg.outer_radius));
        }
    }

    #[test]
    fn schroedinger_fade_and_quantum_numbers(
        fades in prop::collection::vec((any::<bool>(), -2.0f64..2.0), 1..30),
        numbers in prop::collection::vec((0u8..3, 0u32..12, -12i32..12), 1..30),
    ) {
        let mut c = SchroedingerController::new();
        for (start, v) in fades {
            if start { c.set_fade_start(v).unwrap() } else { c.set_fade_end(v).unwrap() }
            let cfg = c.config();
            prop_assert!(schroedinger::FADE.is_ordered(cfg.fade_start, cfg.fade_end));
        }
        for (which, n, m) in numbers {
            match which {
                0 => c.set_principal(n),
                1 => c.set_azimuthal(n),
                _ => c.set_magnetic(m),
            }
            let cfg = c.config();
            prop_assert!((1..=7).contains(&cfg.principal));
            prop_assert!(cfg.azimuthal < cfg.principal);
            prop_assert!(cfg.magnetic.unsigned_abs() <= cfg.azimuthal);
        }
    }

    #[test]
    fn dimension_resize_tracks_length(dims in prop::collection::vec(3usize..=11, 1..12)) {
        let mut state = GeometryState::new();
        for d in dims {
            state.initialize_for_dimension(Dimension::new(d).unwrap());
            for family in Family::ALL {
                prop_assert_eq!(state.parameter_values(family).len(), d - 3);
            }
        }
    }

    #[test]
    fn out_of_range_index_is_a_no_op(d in 3usize..=11, extra in 0usize..5, value in -5.0f64..5.0) {
        let mut state = GeometryState::new();
        state.initialize_for_dimension(Dimension::new(d).unwrap());
        let before = state.snapshot();
        let index = d - 3 + extra;
        for family in Family::ALL {
            let err = state.set_parameter_value(family, index, value).unwrap_err();
            prop_assert_eq!(err, IndexError { index, len: d - 3 });
        }
        prop_assert_eq!(state.snapshot(), before);
    }
}
