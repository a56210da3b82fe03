//! Snapshot exchange with the preset manager.

use ndscape_state::families::{CliffordMode, PolytopePreset, QuantumMode, SymmetryGroup};
use ndscape_state::{
    AxisSlot, DomainMode, EngineConfig, Family, GeometrySnapshot, GeometryState, PresetError,
    StateError,
};

fn strict_state() -> GeometryState {
    GeometryState::with_config(EngineConfig {
        domain_mode: DomainMode::Strict,
        ..EngineConfig::default()
    })
}

fn edited_state() -> GeometryState {
    let mut s = strict_state();
    s.set_dimension(8).unwrap();
    s.polytope_mut().set_symmetry_group(SymmetryGroup::D);
    s.polytope_mut().set_scale(2.5).unwrap();
    s.clifford_torus_mut().set_mode(CliffordMode::Generalized);
    s.clifford_torus_mut().set_torus_k(4);
    s.schroedinger_mut().set_mode(QuantumMode::HydrogenOrbital);
    s.schroedinger_mut().set_principal(6);
    s.schroedinger_mut().set_azimuthal(4);
    s.schroedinger_mut().set_magnetic(-3);
    s.black_hole_mut().set_spin(0.6).unwrap();
    s.black_hole_mut().set_disk_temperature(12000.0).unwrap();
    s.mandelbulb_mut().set_visualization_axis(AxisSlot::Z, 7);
    s.set_parameter_value(Family::NestedTorus, 4, 1.25).unwrap();
    s
}

#[test]
fn json_round_trip_preserves_every_record() {
    let original = edited_state();
    let json = original.to_json().unwrap();
    let restored = GeometryState::from_json(&json).unwrap();
    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.dimension().get(), 8);
}

#[test]
fn json_uses_camel_case_fields() {
    let json = edited_state().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["dimension"], 8);
    assert_eq!(value["blackHole"]["diskTemperature"], 12000.0);
    assert_eq!(value["polytope"]["symmetryGroup"], "D");
    assert_eq!(value["schroedinger"]["mode"], "hydrogenOrbital");
    assert_eq!(value["mandelbulb"]["slice"]["visualizationAxes"][2], 7);
    assert!(value["blackHole"]["kerr"]["iscoPrograde"].is_number());
}

#[test]
fn out_of_range_json_values_are_clamped_on_load() {
    let json = r#"{
        "dimension": 5,
        "mandelbulb": { "power": 99.0, "resolution": 50 },
        "blackHole": { "spin": 4.0, "diskInnerRadiusMul": 999.0, "diskOuterRadiusMul": 5.0 },
        "polytope": { "symmetryGroup": "A", "preset": "truncated" }
    }"#;
    let s = GeometryState::from_json(json).unwrap();
    assert_eq!(s.mandelbulb().config().power, 16.0);
    assert_eq!(s.mandelbulb().config().resolution, 48);
    assert_eq!(s.black_hole().config().spin, 0.998);
    let bh = s.black_hole().config();
    assert!(bh.disk_inner_radius_mul < bh.disk_outer_radius_mul);
    assert_eq!(s.polytope().config().symmetry_group, SymmetryGroup::B);
    assert_eq!(s.polytope().config().preset, PolytopePreset::Truncated);
    assert!(Family::ALL.iter().all(|&f| s.parameter_values(f).len() == 2));
}

#[test]
fn derived_fields_in_json_are_recomputed() {
    let json = r##"{ "blackHole": { "horizonRadius": 6.0, "diskColor": "#000000",
        "kerr": { "mass": 1.0, "spin": 0.0, "eventHorizonRadius": 1.0,
                  "iscoPrograde": 1.0, "iscoRetrograde": 1.0,
                  "photonSpherePrograde": 1.0, "photonSphereRetrograde": 1.0 } } }"##;
    let s = GeometryState::from_json(json).unwrap();
    let bh = s.black_hole().config();
    assert_eq!(bh.kerr.event_horizon_radius, 6.0);
    assert_ne!(bh.disk_color, "#000000");
}

#[test]
fn invalid_dimension_is_rejected_without_changes() {
    let mut s = edited_state();
    let before = s.snapshot();
    let err = s.set_state_json(r#"{ "dimension": 2 }"#).unwrap_err();
    assert!(matches!(err, PresetError::Json(_)));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn malformed_enum_is_a_parse_error() {
    let err = GeometryState::from_json(r#"{ "schroedinger": { "palette": "neon" } }"#).unwrap_err();
    assert!(matches!(err, PresetError::Json(_)));
}

#[test]
fn set_state_from_default_snapshot_resets_to_three_dimensions() {
    let mut s = edited_state();
    s.set_state(&GeometrySnapshot::default()).unwrap();
    assert_eq!(s.dimension().get(), 3);
    assert!(Family::ALL.iter().all(|&f| s.parameter_values(f).is_empty()));
    assert_eq!(s.mandelbulb().config().escape_radius, 4.0);
}

#[test]
fn state_error_reports_validation_field() {
    let mut s = strict_state();
    let mut snapshot = s.snapshot();
    std::sync::Arc::make_mut(&mut snapshot.mandelbox).scale = f64::INFINITY;
    match s.set_state(&snapshot) {
        Err(StateError::Validation(err)) => assert_eq!(err.field(), "scale"),
        other => panic!("expected validation error, got {other:?}"),
    }
}
