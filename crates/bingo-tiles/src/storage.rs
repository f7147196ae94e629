//! Snapshot storage: a single named slot holding the serialized tile order.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};

/// File name of the snapshot inside the state directory.
pub const SNAPSHOT_FILE: &str = "TileOrdering.reordered.json";

/// Durable storage for the current tile order.
pub trait SnapshotStorage {
    /// Read the stored snapshot, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored snapshot.
    fn save(&mut self, contents: &str) -> Result<()>;
}

/// Snapshot kept in a JSON file, written atomically.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot file under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the stored snapshot. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::Io {
                operation: "remove",
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl SnapshotStorage for FileSnapshot {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Write to a temp file first, then rename over the snapshot.
    fn save(&mut self, contents: &str) -> Result<()> {
        let path = self.path.as_path();
        let temp_path = path.with_extension("json.tmp");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "saved tile snapshot");
        Ok(())
    }
}

/// In-memory snapshot with an optional size quota.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    contents: Option<String>,
    quota: Option<usize>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `contents` already stored.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            quota: None,
        }
    }

    /// Reject writes larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SnapshotStorage for MemorySnapshot {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        if let Some(quota) = self.quota
            && contents.len() > quota
        {
            return Err(PersistenceError::QuotaExceeded {
                size: contents.len(),
                quota,
            });
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }
}
