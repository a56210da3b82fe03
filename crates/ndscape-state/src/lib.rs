#![forbid(unsafe_code)]

//! State: family controllers, the aggregate container, and snapshot
//! publication.
//!
//! # Role in ndscape
//! `ndscape-state` holds the tunable configuration of every geometry and
//! fractal family. The UI calls mutators; the renderer reads committed
//! records once per frame.
//!
//! # Primary responsibilities
//! - **Controller**: copy-on-publish owner of one family record. Every
//!   mutator clamps, orders, and re-derives before the single-assignment
//!   commit.
//! - **Families**: one record, patch builder and setter set per family.
//! - **GeometryState**: the explicitly constructed container that fans out
//!   dimension changes and exchanges JSON snapshots with the preset manager.
//! - **StateStore**: single-writer, multi-reader publication for hosts that
//!   render on another thread.
//! - **EngineConfig**: domain-error policy and initial dimension, loadable
//!   from JSON or TOML.
//!
//! # Example
//!
//! ```
//! use ndscape_state::{Family, GeometryState};
//!
//! let mut state = GeometryState::new();
//! state.set_dimension(9).unwrap();
//! assert_eq!(state.mandelbulb().config().escape_radius, 12.0);
//! assert_eq!(state.parameter_values(Family::Mandelbulb).len(), 6);
//!
//! state.black_hole_mut().set_horizon_radius(10.0).unwrap();
//! assert_eq!(state.black_hole().config().kerr.event_horizon_radius, 10.0);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod families;
pub mod slice;
pub mod state;
pub mod store;

pub use config::EngineConfig;
pub use controller::{ConfigPatch, Controller, FamilyConfig};
pub use error::{ConfigError, PresetError, StateError};
pub use families::FractalColorMode;
pub use ndscape_core::{
    AxisSlot, Dimension, DomainError, DomainMode, Family, IndexError, ValidationError,
};
pub use slice::DimensionSlice;
pub use state::{GeometrySnapshot, GeometryState};
pub use store::{Published, StateReader, StateStore};
