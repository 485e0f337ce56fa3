//! State store abstraction and the persisted state model.
//!
//! The engine persists a single JSON blob under a fixed key. The wire
//! field names are camelCase and loads are tolerant of missing fields,
//! so blobs written by older versions keep working.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GachaError;

/// Storage key under which the engine persists its state blob.
pub const STATE_KEY: &str = "gachaMachineData";

/// One committed draw, as stored in the state blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDraw {
    /// The option label at the time of the draw.
    pub option: String,
    /// When the draw happened.
    pub timestamp: DateTime<Utc>,
    /// Running pick count at the time of the draw (1-based).
    pub pick_number: u64,
}

/// The persisted subset of machine state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    /// Selectable options, in display order. `None` means the blob
    /// predates the field and the built-in defaults apply.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Total number of committed draws.
    #[serde(default)]
    pub total_picks: u64,
    /// Most recently drawn option.
    #[serde(default)]
    pub last_pick: Option<String>,
    /// Draw history, oldest first.
    #[serde(default)]
    pub spin_results: Vec<StoredDraw>,
}

/// Store for the engine's single persisted state blob.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persists the given state, replacing any previous blob.
    async fn save(&self, state: &PersistedState) -> Result<(), GachaError>;

    /// Loads the persisted state. Returns `Ok(None)` when nothing usable
    /// has been stored yet.
    async fn load(&self) -> Result<Option<PersistedState>, GachaError>;
}
