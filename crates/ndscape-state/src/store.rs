#![forbid(unsafe_code)]

//! Single-writer, multi-reader publication of whole-state snapshots.
//!
//! [`StateStore`] owns the [`GeometryState`] and is the only writer. Every
//! [`StateStore::update`] runs the mutation and then publishes one
//! [`Published`] value through an [`ArcSwap`]. [`StateReader`] handles are
//! cheap to clone and send to render threads; a load never blocks and
//! always returns a complete snapshot.
//!
//! ```
//! use ndscape_state::StateStore;
//!
//! let mut store = StateStore::new();
//! let reader = store.reader();
//! store.update(|state| state.set_dimension(6)).unwrap();
//! assert_eq!(reader.load().snapshot.dimension.get(), 6);
//! assert_eq!(reader.load().version, 1);
//! ```

use std::sync::Arc;

use arc_swap::{ArcSwap, Guard};
use tracing::trace;

use crate::config::EngineConfig;
use crate::state::{GeometrySnapshot, GeometryState};

/// One published state, tagged with the number of updates before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub version: u64,
    pub snapshot: GeometrySnapshot,
}

/// Writer side: owns the state and publishes after every update.
#[derive(Debug)]
pub struct StateStore {
    state: GeometryState,
    version: u64,
    published: Arc<ArcSwap<Published>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(GeometryState::new())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_state(GeometryState::with_config(config))
    }

    #[must_use]
    pub fn from_state(state: GeometryState) -> Self {
        let published = Arc::new(ArcSwap::from_pointee(Published {
            version: 0,
            snapshot: state.snapshot(),
        }));
        Self {
            state,
            version: 0,
            published,
        }
    }

    /// The writer's current state.
    #[inline]
    pub fn state(&self) -> &GeometryState {
        &self.state
    }

    /// Number of updates published so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// A new read handle onto the published snapshots.
    #[must_use]
    pub fn reader(&self) -> StateReader {
        StateReader {
            published: Arc::clone(&self.published),
        }
    }

    /// Run `mutate` against the state, then publish the result.
    ///
    /// Publishes even when `mutate` returns an error value; a failing
    /// container operation leaves the state as it was, so the published
    /// snapshot is still whole.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut GeometryState) -> R) -> R {
        let result = mutate(&mut self.state);
        self.version += 1;
        self.published.store(Arc::new(Published {
            version: self.version,
            snapshot: self.state.snapshot(),
        }));
        trace!(version = self.version, "published geometry snapshot");
        result
    }

    /// Consume the store, returning the writer's state.
    #[must_use]
    pub fn into_state(self) -> GeometryState {
        self.state
    }
}

/// Read side. `Clone + Send + Sync`.
#[derive(Debug, Clone)]
pub struct StateReader {
    published: Arc<ArcSwap<Published>>,
}

impl StateReader {
    /// The latest published state, as an owned handle.
    #[must_use]
    pub fn load(&self) -> Arc<Published> {
        self.published.load_full()
    }

    /// The latest published state without touching the reference count.
    /// Do not hold the guard across long operations.
    #[inline]
    pub fn load_ref(&self) -> Guard<Arc<Published>> {
        self.published.load()
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.published.load().version
    }
}
