//! Directory-backed blob store
//!
//! Each key lives in `<data_dir>/<key>.json`. Writes go to a sibling
//! `.tmp` file which is then renamed over the target, so a crash never
//! leaves a half-written record behind.

use super::BlobStore;
use focusup_shared::{AppError, AppResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> AppError {
    AppError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| storage_error("create", &self.dir, e))?;

        let tmp_path = path.with_extension(format!("{}.tmp", EXTENSION));
        fs::write(&tmp_path, value).map_err(|e| storage_error("write", &tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| storage_error("replace", &path, e))?;

        debug!(key, bytes = value.len(), "Stored blob");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &path, e)),
        }
    }

    fn clear(&mut self) -> AppResult<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(storage_error("list", &self.dir, e)),
        };

        for entry in entries {
            let path = entry.map_err(|e| storage_error("list", &self.dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(EXTENSION) {
                fs::remove_file(&path).map_err(|e| storage_error("remove", &path, e))?;
            }
        }
        Ok(())
    }
}
