#![forbid(unsafe_code)]

//! The aggregate container for every family controller.
//!
//! [`GeometryState`] is constructed by the host and passed to whatever
//! needs it; there is no global instance. It fans dimension changes out to
//! every family, dispatches auxiliary-parameter edits by [`Family`], and
//! exchanges whole-state snapshots with the preset manager.
//!
//! # Invariants
//!
//! 1. After any container operation every family is initialized for
//!    [`GeometryState::dimension`].
//! 2. [`GeometryState::set_state`] either restores every family or leaves
//!    the container untouched.

use std::sync::Arc;

use ndscape_core::{Dimension, DomainError, Family, IndexError};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::config::EngineConfig;
use crate::error::{PresetError, StateError};
use crate::families::{
    BlackHoleConfig, BlackHoleController, CliffordTorusConfig, CliffordTorusController,
    KaliConfig, KaliController, MandelboxConfig, MandelboxController, MandelbulbConfig,
    MandelbulbController, MengerConfig, MengerController, NestedTorusConfig,
    NestedTorusController, PolytopeConfig, PolytopeController, QuaternionJuliaConfig,
    QuaternionJuliaController, RootSystemConfig, RootSystemController, SchroedingerConfig,
    SchroedingerController,
};

/// Run `$body` with `$c` bound to the controller for `$family`.
macro_rules! dispatch {
    ($state:expr, $family:expr, |$c:ident| $body:expr) => {
        match $family {
            Family::Polytope => {
                let $c = &mut $state.polytope;
                $body
            }
            Family::RootSystem => {
                let $c = &mut $state.root_system;
                $body
            }
            Family::CliffordTorus => {
                let $c = &mut $state.clifford_torus;
                $body
            }
            Family::NestedTorus => {
                let $c = &mut $state.nested_torus;
                $body
            }
            Family::Mandelbulb => {
                let $c = &mut $state.mandelbulb;
                $body
            }
            Family::Mandelbox => {
                let $c = &mut $state.mandelbox;
                $body
            }
            Family::Kali => {
                let $c = &mut $state.kali;
                $body
            }
            Family::QuaternionJulia => {
                let $c = &mut $state.quaternion_julia;
                $body
            }
            Family::Menger => {
                let $c = &mut $state.menger;
                $body
            }
            Family::Schroedinger => {
                let $c = &mut $state.schroedinger;
                $body
            }
            Family::BlackHole => {
                let $c = &mut $state.black_hole;
                $body
            }
        }
    };
}

/// Run `$body` once per family controller.
macro_rules! for_each_controller {
    ($state:expr, |$c:ident| $body:expr) => {
        for family in Family::ALL {
            dispatch!($state, family, |$c| $body);
        }
    };
}

/// Every family record at one instant, as exchanged with the preset
/// manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeometrySnapshot {
    pub dimension: Dimension,
    pub polytope: Arc<PolytopeConfig>,
    pub root_system: Arc<RootSystemConfig>,
    pub clifford_torus: Arc<CliffordTorusConfig>,
    pub nested_torus: Arc<NestedTorusConfig>,
    pub mandelbulb: Arc<MandelbulbConfig>,
    pub mandelbox: Arc<MandelboxConfig>,
    pub kali: Arc<KaliConfig>,
    pub quaternion_julia: Arc<QuaternionJuliaConfig>,
    pub menger: Arc<MengerConfig>,
    pub schroedinger: Arc<SchroedingerConfig>,
    pub black_hole: Arc<BlackHoleConfig>,
}

/// One controller per geometry family plus the shared ambient dimension.
#[derive(Debug, Clone)]
pub struct GeometryState {
    config: EngineConfig,
    dimension: Dimension,
    polytope: PolytopeController,
    root_system: RootSystemController,
    clifford_torus: CliffordTorusController,
    nested_torus: NestedTorusController,
    mandelbulb: MandelbulbController,
    mandelbox: MandelboxController,
    kali: KaliController,
    quaternion_julia: QuaternionJuliaController,
    menger: MengerController,
    schroedinger: SchroedingerController,
    black_hole: BlackHoleController,
}

impl Default for GeometryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Every family at its defaults for `config.initial_dimension`,
    /// saturated into `[3, 11]`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let dimension = Dimension::saturating(config.initial_dimension);
        if dimension.get() != config.initial_dimension {
            warn!(
                requested = config.initial_dimension,
                dimension = dimension.get(),
                "initial dimension out of range, clamped"
            );
        }
        Self::fresh(config, dimension)
    }

    fn fresh(config: EngineConfig, dimension: Dimension) -> Self {
        Self {
            config,
            dimension,
            polytope: PolytopeController::for_dimension(dimension),
            root_system: RootSystemController::for_dimension(dimension),
            clifford_torus: CliffordTorusController::for_dimension(dimension),
            nested_torus: NestedTorusController::for_dimension(dimension),
            mandelbulb: MandelbulbController::for_dimension(dimension),
            mandelbox: MandelboxController::for_dimension(dimension),
            kali: KaliController::for_dimension(dimension),
            quaternion_julia: QuaternionJuliaController::for_dimension(dimension),
            menger: MengerController::for_dimension(dimension),
            schroedinger: SchroedingerController::for_dimension(dimension),
            black_hole: BlackHoleController::for_dimension(dimension),
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Change the ambient dimension and re-initialize every family.
    ///
    /// Out-of-range input fails in strict domain mode and is saturated
    /// with a warning in clamp mode.
    pub fn set_dimension(&mut self, dimension: usize) -> Result<Dimension, DomainError> {
        let resolved = Dimension::resolve(dimension, self.config.domain_mode)?;
        if resolved.get() != dimension {
            warn!(
                requested = dimension,
                dimension = resolved.get(),
                "dimension out of range, clamped"
            );
        }
        self.initialize_for_dimension(resolved);
        Ok(resolved)
    }

    /// Re-initialize every family for `dimension`.
    pub fn initialize_for_dimension(&mut self, dimension: Dimension) {
        let _span = debug_span!("initialize_for_dimension", dimension = dimension.get()).entered();
        debug!(from = self.dimension.get(), to = dimension.get(), "dimension change");
        self.dimension = dimension;
        for_each_controller!(self, |c| c.initialize_for_dimension(dimension));
    }

    /// Set auxiliary parameter `index` of `family`.
    pub fn set_parameter_value(
        &mut self,
        family: Family,
        index: usize,
        value: f64,
    ) -> Result<(), IndexError> {
        let result = dispatch!(self, family, |c| c.set_parameter_value(index, value));
        if let Err(err) = &result {
            if self.config.log_index_errors {
                warn!(family = family.name(), index = err.index, len = err.len, "{err}");
            }
        }
        result
    }

    /// Auxiliary values of `family`.
    pub fn parameter_values(&self, family: Family) -> &[f64] {
        match family {
            Family::Polytope => self.polytope.parameter_values(),
            Family::RootSystem => self.root_system.parameter_values(),
            Family::CliffordTorus => self.clifford_torus.parameter_values(),
            Family::NestedTorus => self.nested_torus.parameter_values(),
            Family::Mandelbulb => self.mandelbulb.parameter_values(),
            Family::Mandelbox => self.mandelbox.parameter_values(),
            Family::Kali => self.kali.parameter_values(),
            Family::QuaternionJulia => self.quaternion_julia.parameter_values(),
            Family::Menger => self.menger.parameter_values(),
            Family::Schroedinger => self.schroedinger.parameter_values(),
            Family::BlackHole => self.black_hole.parameter_values(),
        }
    }

    /// Zero the auxiliary vector of `family`.
    pub fn reset_parameters(&mut self, family: Family) {
        dispatch!(self, family, |c| c.reset_parameters());
    }

    /// Fresh defaults for every family at the current dimension.
    pub fn reset(&mut self) {
        debug!(dimension = self.dimension.get(), "reset geometry state");
        *self = Self::fresh(self.config.clone(), self.dimension);
    }

    /// Shared handles to every committed record.
    #[must_use]
    pub fn snapshot(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            dimension: self.dimension,
            polytope: self.polytope.snapshot(),
            root_system: self.root_system.snapshot(),
            clifford_torus: self.clifford_torus.snapshot(),
            nested_torus: self.nested_torus.snapshot(),
            mandelbulb: self.mandelbulb.snapshot(),
            mandelbox: self.mandelbox.snapshot(),
            kali: self.kali.snapshot(),
            quaternion_julia: self.quaternion_julia.snapshot(),
            menger: self.menger.snapshot(),
            schroedinger: self.schroedinger.snapshot(),
            black_hole: self.black_hole.snapshot(),
        }
    }

    /// Restore every family from `snapshot` through the validating setters.
    ///
    /// A record initialized for a dimension other than
    /// `snapshot.dimension` is re-initialized after restoring.
    pub fn set_state(&mut self, snapshot: &GeometrySnapshot) -> Result<(), StateError> {
        let dimension = snapshot.dimension;
        let mut staged = self.clone();
        staged.dimension = dimension;
        staged.polytope.restore(&snapshot.polytope)?;
        staged.root_system.restore(&snapshot.root_system)?;
        staged.clifford_torus.restore(&snapshot.clifford_torus)?;
        staged.nested_torus.restore(&snapshot.nested_torus)?;
        staged.mandelbulb.restore(&snapshot.mandelbulb)?;
        staged.mandelbox.restore(&snapshot.mandelbox)?;
        staged.kali.restore(&snapshot.kali)?;
        staged.quaternion_julia.restore(&snapshot.quaternion_julia)?;
        staged.menger.restore(&snapshot.menger)?;
        staged.schroedinger.restore(&snapshot.schroedinger)?;
        staged.black_hole.restore(&snapshot.black_hole)?;
        for_each_controller!(staged, |c| {
            if c.dimension() != dimension {
                c.initialize_for_dimension(dimension);
            }
        });
        debug!(dimension = dimension.get(), "restored geometry state");
        *self = staged;
        Ok(())
    }

    /// Serialize the current snapshot as JSON.
    pub fn to_json(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Build a default-configured container from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        let mut state = Self::new();
        state.set_state_json(json)?;
        Ok(state)
    }

    /// Restore from a JSON snapshot; nothing changes on failure.
    pub fn set_state_json(&mut self, json: &str) -> Result<(), PresetError> {
        let snapshot: GeometrySnapshot = serde_json::from_str(json)?;
        self.set_state(&snapshot)?;
        Ok(())
    }

    pub fn polytope(&self) -> &PolytopeController {
        &self.polytope
    }

    pub fn polytope_mut(&mut self) -> &mut PolytopeController {
        &mut self.polytope
    }

    pub fn root_system(&self) -> &RootSystemController {
        &self.root_system
    }

    pub fn root_system_mut(&mut self) -> &mut RootSystemController {
        &mut self.root_system
    }

    pub fn clifford_torus(&self) -> &CliffordTorusController {
        &self.clifford_torus
    }

    pub fn clifford_torus_mut(&mut self) -> &mut CliffordTorusController {
        &mut self.clifford_torus
    }

    pub fn nested_torus(&self) -> &NestedTorusController {
        &self.nested_torus
    }

    pub fn nested_torus_mut(&mut self) -> &mut NestedTorusController {
        &mut self.nested_torus
    }

    pub fn mandelbulb(&self) -> &MandelbulbController {
        &self.mandelbulb
    }

    pub fn mandelbulb_mut(&mut self) -> &mut MandelbulbController {
        &mut self.mandelbulb
    }

    pub fn mandelbox(&self) -> &MandelboxController {
        &self.mandelbox
    }

    pub fn mandelbox_mut(&mut self) -> &mut MandelboxController {
        &mut self.mandelbox
    }

    pub fn kali(&self) -> &KaliController {
        &self.kali
    }

    pub fn kali_mut(&mut self) -> &mut KaliController {
        &mut self.kali
    }

    pub fn quaternion_julia(&self) -> &QuaternionJuliaController {
        &self.quaternion_julia
    }

    pub fn quaternion_julia_mut(&mut self) -> &mut QuaternionJuliaController {
        &mut self.quaternion_julia
    }

    pub fn menger(&self) -> &MengerController {
        &self.menger
    }

    pub fn menger_mut(&mut self) -> &mut MengerController {
        &mut self.menger
    }

    pub fn schroedinger(&self) -> &SchroedingerController {
        &self.schroedinger
    }

    pub fn schroedinger_mut(&mut self) -> &mut SchroedingerController {
        &mut self.schroedinger
    }

    pub fn black_hole(&self) -> &BlackHoleController {
        &self.black_hole
    }

    pub fn black_hole_mut(&mut self) -> &mut BlackHoleController {
        &mut self.black_hole
    }
}
