// SPDX-License-Identifier: Apache-2.0

use crate::backend::{StoreError, StoreErrorCode};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;
use workout_finder_model::{SavedFilters, SAVED_FILTERS_KEY};

/// Key-value blob holding a client's last filter state, one JSON file per key.
#[derive(Debug, Clone)]
pub struct SavedFiltersStore {
    dir: PathBuf,
}

impl SavedFiltersStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{SAVED_FILTERS_KEY}.json"))
    }

    /// Missing or malformed blobs load as `None`; a malformed blob is logged.
    #[must_use]
    pub fn load(&self) -> Option<SavedFilters> {
        let path = self.path();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read saved filters");
                return None;
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(filters) => Some(filters),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse saved filters");
                None
            }
        }
    }

    pub fn save(&self, filters: &SavedFilters) -> Result<(), StoreError> {
        let io = |e: std::io::Error| StoreError::new(StoreErrorCode::Io, e.to_string());
        fs::create_dir_all(&self.dir).map_err(io)?;
        let bytes = serde_json::to_vec(filters)
            .map_err(|e| StoreError::new(StoreErrorCode::Decode, e.to_string()))?;
        let path = self.path();
        let tmp = tmp_path(&path);
        fs::write(&tmp, bytes).map_err(io)?;
        fs::rename(&tmp, &path).map_err(io)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(StoreErrorCode::Io, e.to_string())),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
