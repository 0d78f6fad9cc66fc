// src/store.rs
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::version::Version;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{} is a directory, not a version file", .0.display())]
    IsDirectory(PathBuf),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Last notified version, kept as a bare string in a single file.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    /// Open the store, creating an empty file (and its parent directories)
    /// when nothing exists at `path` yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            path: path.to_path_buf(),
        };
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| store.io_error(e))?;
            }
            fs::File::create(path).map_err(|e| store.io_error(e))?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Option<Version>, StoreError> {
        if self.path.is_dir() {
            return Err(StoreError::IsDirectory(self.path.clone()));
        }
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Version::new(token)))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Overwrite the stored version. A directory squatting on the path is
    /// removed first.
    pub fn write(&self, version: &Version) -> Result<(), StoreError> {
        if self.path.is_dir() {
            warn!(
                path = %self.path.display(),
                "Version file path is a directory, removing it"
            );
            fs::remove_dir_all(&self.path).map_err(|e| self.io_error(e))?;
        }
        let mut file = fs::File::create(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(version.as_str().as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
