//! JSON snapshot file backing the record store.
//!
//! The whole user sequence is rewritten on every save as a pretty-printed
//! array with four-space indentation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::StoreError;
use crate::models::User;

/// Outcome of reading the snapshot file.
#[derive(Debug)]
pub enum SnapshotRead {
    /// The file does not exist yet.
    Missing,
    /// The file parsed as a user list.
    Records(Vec<User>),
    /// The file exists but is not a JSON array of users.
    Malformed(serde_json::Error),
}

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the snapshot without deciding what to do with bad content.
    pub fn read(&self) -> Result<SnapshotRead, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SnapshotRead::Missing),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        // A file that was created but never written counts as an empty store.
        if content.trim().is_empty() {
            return Ok(SnapshotRead::Records(Vec::new()));
        }

        Ok(match serde_json::from_str(&content) {
            Ok(users) => SnapshotRead::Records(users),
            Err(e) => SnapshotRead::Malformed(e),
        })
    }

    /// Load the persisted sequence.
    ///
    /// A missing file yields an empty sequence. Malformed content yields an
    /// empty sequence too, unless `strict` is set, in which case it is
    /// reported as [`StoreError::Corrupt`].
    pub fn load(&self, strict: bool) -> Result<Vec<User>, StoreError> {
        match self.read()? {
            SnapshotRead::Missing => {
                tracing::debug!(path = %self.path.display(), "no snapshot yet, starting empty");
                Ok(Vec::new())
            }
            SnapshotRead::Records(users) => Ok(users),
            SnapshotRead::Malformed(source) if strict => Err(StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            SnapshotRead::Malformed(source) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %source,
                    "snapshot is unreadable, starting with an empty store"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the snapshot with the full sequence.
    pub fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        users.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        std::fs::write(&self.path, buf).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
