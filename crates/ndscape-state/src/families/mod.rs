#![forbid(unsafe_code)]

//! One module per geometry family.
//!
//! Each module defines the family's record (`FooConfig`), its partial
//! update builder (`FooPatch`), the field setters on
//! `Controller<FooConfig>`, and a `FooController` alias.

pub mod black_hole;
pub mod clifford_torus;
pub mod kali;
pub mod mandelbox;
pub mod mandelbulb;
pub mod menger;
pub mod nested_torus;
pub mod polytope;
pub mod quaternion_julia;
pub mod root_system;
pub mod schroedinger;

use serde::{Deserialize, Serialize};

pub use black_hole::{BlackHoleConfig, BlackHoleController, BlackHolePatch};
pub use clifford_torus::{
    CliffordMode, CliffordTorusConfig, CliffordTorusController, CliffordTorusPatch,
};
pub use kali::{KaliConfig, KaliController, KaliPatch};
pub use mandelbox::{MandelboxConfig, MandelboxController, MandelboxPatch};
pub use mandelbulb::{MandelbulbConfig, MandelbulbController, MandelbulbPatch};
pub use menger::{MengerConfig, MengerController, MengerPatch};
pub use nested_torus::{NestedTorusConfig, NestedTorusController, NestedTorusPatch};
pub use polytope::{
    PolytopeConfig, PolytopeController, PolytopePatch, PolytopePreset, SymmetryGroup,
};
pub use quaternion_julia::{
    QuaternionComponent, QuaternionJuliaConfig, QuaternionJuliaController, QuaternionJuliaPatch,
};
pub use root_system::{RootSystemConfig, RootSystemController, RootSystemPatch, RootType};
pub use schroedinger::{
    ColorPalette, QuantumMode, SchroedingerConfig, SchroedingerController, SchroedingerPatch,
};

/// Surface coloring shared by the escape-time fractals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FractalColorMode {
    #[default]
    Iteration,
    OrbitTrap,
    Normal,
    DistanceGlow,
}

impl FractalColorMode {
    pub const ALL: [FractalColorMode; 4] = [
        FractalColorMode::Iteration,
        FractalColorMode::OrbitTrap,
        FractalColorMode::Normal,
        FractalColorMode::DistanceGlow,
    ];
}
