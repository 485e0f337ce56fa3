//! Test stores: mock `StateStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use gachapon_core::error::GachaError;
use gachapon_core::store::{PersistedState, StateStore};

/// A state store that keeps everything in memory. Returns the configured
/// blob from every `load` call and records every `save` for later
/// inspection.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    loaded: Mutex<Option<PersistedState>>,
    saved: Mutex<Vec<PersistedState>>,
}

impl MemoryStateStore {
    /// Creates an empty store; `load` returns `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a blob returned from every `load`.
    #[must_use]
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            loaded: Mutex::new(Some(state)),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all states that were saved, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved_states(&self) -> Vec<PersistedState> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns the most recently saved state, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_saved(&self) -> Option<PersistedState> {
        self.saved.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn save(&self, state: &PersistedState) -> Result<(), GachaError> {
        self.saved.lock().unwrap().push(state.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<PersistedState>, GachaError> {
        Ok(self.loaded.lock().unwrap().clone())
    }
}

/// A state store that always returns a persistence error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStateStore;

#[async_trait]
impl StateStore for FailingStateStore {
    async fn save(&self, _state: &PersistedState) -> Result<(), GachaError> {
        Err(GachaError::Persistence("disk unavailable".into()))
    }

    async fn load(&self) -> Result<Option<PersistedState>, GachaError> {
        Err(GachaError::Persistence("disk unavailable".into()))
    }
}
