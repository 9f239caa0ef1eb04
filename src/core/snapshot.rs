//! JSON snapshots of a game's state, so a suspended session resumes exactly
//! where it stopped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a, S> {
    version: u32,
    state: &'a S,
}

#[derive(Deserialize)]
struct SnapshotIn<S> {
    version: u32,
    state: S,
}

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the state through a temporary file so a crash never leaves a
    /// half-written snapshot behind.
    pub fn save<S: Serialize>(&self, state: &S) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&SnapshotOut {
            version: SNAPSHOT_VERSION,
            state,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load<S: DeserializeOwned>(&self) -> Result<Option<S>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };

        let snapshot: SnapshotIn<S> = serde_json::from_str(&json)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            bail!(
                "unsupported snapshot version {} in {}",
                snapshot.version,
                self.path.display()
            );
        }
        Ok(Some(snapshot.state))
    }

    /// Drops the snapshot; a missing file is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "snapshot cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        assert_eq!(store.load::<Counter>().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("state.json"));
        store.save(&Counter { value: 7 }).unwrap();
        assert_eq!(store.load::<Counter>().unwrap(), Some(Counter { value: 7 }));
        assert!(!dir.path().join("nested").join("state.json.tmp").exists());
    }

    #[test]
    fn test_clear_removes_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("state.json"));
        store.clear().unwrap();

        store.save(&Counter { value: 1 }).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        let store = SnapshotStore::new(&path);
        assert!(store.load::<Counter>().is_err());
    }

    #[test]
    fn test_unknown_version_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"version":99,"state":{"value":1}}"#).unwrap();
        let err = SnapshotStore::new(&path).load::<Counter>().unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version 99"));
    }
}
