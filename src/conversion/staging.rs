//! Staging directory for in-place resampling
//!
//! Converted files land here first and are then renamed over the originals.
//! The directory has a fixed name under the configured anchor path, so a
//! leftover from an interrupted run is found and cleared on the next one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::files::remove_path_with_files;

/// Name of the staging directory created under the anchor path
pub const STAGING_DIR_NAME: &str = "audio-prep-resampling-temp-folder";

/// Owns the staging directory for the duration of one batch
///
/// Removed recursively by `close()`, or on drop if the batch bailed out early.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    removed: bool,
}

impl StagingDir {
    /// Create a fresh staging directory under `main_path`
    ///
    /// A stale directory from a previous run is deleted first.
    pub fn create(main_path: &Path) -> Result<Self> {
        let path = staging_path(main_path);

        if path.exists() {
            log::warn!("Removing stale staging directory: {:?}", path);
            remove_path_with_files(&path)?;
        }

        fs::create_dir(&path)?;
        log::debug!("Staging directory ready: {:?}", path);

        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a file with this name is written inside the staging directory
    pub fn staged_path(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Remove the directory and everything in it, reporting failures
    pub fn close(mut self) -> Result<()> {
        self.removed = true;
        remove_path_with_files(&self.path)?;
        log::debug!("Removed staging directory: {:?}", self.path);
        Ok(())
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            log::warn!("Failed to remove staging directory {:?}: {}", self.path, e);
        }
    }
}

/// Location of the staging directory for a given anchor path
pub fn staging_path(main_path: &Path) -> PathBuf {
    main_path.join(STAGING_DIR_NAME)
}
