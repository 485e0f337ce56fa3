//! JSON file persistence for machine state.
//!
//! The whole session lives in one pretty-printed JSON file named after
//! the storage key. Saves replace the file; a malformed file is logged
//! and treated as absent so a damaged session never blocks a fresh
//! start.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use gachapon_core::error::GachaError;
use gachapon_core::store::{PersistedState, STATE_KEY, StateStore};

/// File-backed `StateStore` keeping the state under a single key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store that keeps `gachaMachineData.json` inside `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{STATE_KEY}.json")),
        }
    }

    /// Full path of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_state(contents: &str) -> Result<PersistedState, GachaError> {
        serde_json::from_str(contents)
            .map_err(|err| GachaError::MalformedState(format!("invalid state blob: {err}")))
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn save(&self, state: &PersistedState) -> Result<(), GachaError> {
        let contents = serde_json::to_string_pretty(state)
            .map_err(|err| GachaError::Persistence(format!("failed to encode state: {err}")))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|err| GachaError::Persistence(format!("failed to write state file: {err}")))
    }

    async fn load(&self) -> Result<Option<PersistedState>, GachaError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(GachaError::Persistence(format!(
                    "failed to read state file: {err}"
                )));
            }
        };

        match Self::parse_state(&contents) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding malformed state blob");
                Ok(None)
            }
        }
    }
}
