//! Per-user persistence of model collections.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::record::ModelSet;

/// Errors raised by the model store and the operation layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid user name {0:?}")]
    InvalidUser(String),

    #[error("no model with id {id}")]
    UnknownModel { id: u32 },

    #[error("unsupported operation: {modality} {action}")]
    UnsupportedOperation {
        modality: &'static str,
        action: &'static str,
    },

    #[error("request does not match the dispatched operation")]
    RequestMismatch,

    #[error(transparent)]
    Vault(#[from] vault::VaultError),
}

/// One JSON model file per user under a root directory.
///
/// Saves go through a temporary file and rename so a crash never leaves a
/// half-written collection behind. Concurrent writers for the same user
/// must be excluded by the caller.
#[derive(Clone, Debug)]
pub struct ModelStore {
    root: PathBuf,
}

impl ModelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The model file path for `user`.
    pub fn path_for(&self, user: &str) -> Result<PathBuf, StoreError> {
        if user.is_empty() || user.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidUser(user.to_string()));
        }
        Ok(self.root.join(format!("{user}.json")))
    }

    /// Load a user's collection; a missing file is an empty collection.
    pub fn load(&self, user: &str) -> Result<ModelSet, StoreError> {
        let path = self.path_for(user)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(ModelSet::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Persist a user's collection.
    ///
    /// An empty collection removes the model file instead, matching the
    /// last-model-removed lifecycle.
    pub fn save(&self, user: &str, set: &ModelSet) -> Result<(), StoreError> {
        let path = self.path_for(user)?;
        if set.is_empty() {
            remove_if_present(&path)?;
            debug!(user, "removed empty model file");
            return Ok(());
        }

        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(set)?)?;
        fs::rename(&tmp, &path)?;
        debug!(user, records = set.len(), "saved model file");
        Ok(())
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
