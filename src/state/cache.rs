//! Resume point: the basename of the last viewed image.

use std::path::{Path, PathBuf};

use crate::constants::CACHE_FILENAME;

/// Single-line cache file at `<dataset>/.cache`.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    pub fn for_dataset(dataset_dir: &Path) -> Self {
        Self {
            path: dataset_dir.join(CACHE_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The cached basename, if the file exists and is not blank.
    pub fn read(&self) -> Option<String> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        let name = text.lines().next()?.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Overwrite the cache. Failures are logged and swallowed.
    pub fn write(&self, basename: &str) {
        match std::fs::write(&self.path, format!("{basename}\n")) {
            Ok(()) => log::debug!("Cached {}", basename),
            Err(e) => log::warn!("Failed to write {:?}: {}", self.path, e),
        }
    }
}
