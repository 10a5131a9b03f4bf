//! Snapshot persistence as a single TOML document.
//!
//! [`TomlSnapshotFile`] is the production [`SnapshotSource`]: it reads the
//! file named in `storage.snapshot_path` and parses it into a [`Snapshot`].
//! A missing file is treated as an empty store (first run).

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::application::load_snapshot::{LoadError, SnapshotSource};
use crate::application::snapshot::Snapshot;

/// Error type for snapshot file operations.
#[derive(Debug, Error)]
pub enum SnapshotFileError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing snapshot at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse snapshot TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The snapshot could not be serialized to TOML.
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A snapshot stored in one TOML file.
#[derive(Debug, Clone)]
pub struct TomlSnapshotFile {
    path: PathBuf,
}

impl TomlSnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, returning an empty one if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotFileError::Io`] for file-system errors other than
    /// "not found", and [`SnapshotFileError::Parse`] if the TOML is malformed.
    pub fn read(&self) -> Result<Snapshot, SnapshotFileError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no snapshot at {}, starting empty", self.path.display());
                Ok(Snapshot::default())
            }
            Err(source) => Err(SnapshotFileError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes `snapshot`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotFileError::Io`] for file-system failures or
    /// [`SnapshotFileError::Serialize`] if serialization fails.
    pub fn write(&self, snapshot: &Snapshot) -> Result<(), SnapshotFileError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| SnapshotFileError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, content).map_err(|source| SnapshotFileError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SnapshotSource for TomlSnapshotFile {
    fn load(&self) -> Result<Snapshot, LoadError> {
        self.read().map_err(|e| LoadError::Source(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
