//! File-backed store - one JSON document per owner under a root directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flow_model::Flowchart;
use tracing::debug;

use super::{FlowStore, OwnerId, StoreError};

/// A store that keeps each owner's graph in `<root>/<owner>.json`.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory the store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn owner_path(&self, owner: OwnerId) -> PathBuf {
        self.root.join(format!("{}.json", owner))
    }
}

impl FlowStore for JsonFileStore {
    fn load(&self, owner: OwnerId) -> Result<Option<Flowchart>, StoreError> {
        match fs::read_to_string(self.owner_path(owner)) {
            Ok(json) => {
                debug!(%owner, "flowchart loaded");
                Ok(Some(serde_json::from_str(&json)?))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, owner: OwnerId, chart: &Flowchart) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(chart)?;
        fs::write(self.owner_path(owner), json)?;
        debug!(%owner, "flowchart saved");
        Ok(())
    }
}
