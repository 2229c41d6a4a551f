//! Audio file discovery

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PrepError, Result};

/// Extensions of the uncompressed containers the sample rate reader accepts
const PCM_EXTENSIONS: &[&str] = &["wav", "wave", "aif", "aiff"];

/// Check if a file is a PCM audio file based on its extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            PCM_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Collect audio files under a directory, sorted by path
///
/// With `recursive` false only direct children are returned. Unreadable
/// entries are skipped.
pub fn collect_audio_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PrepError::NotADirectory(dir.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    // Sort for consistent ordering
    files.sort();

    log::debug!("Found {} audio files under {:?}", files.len(), dir);
    Ok(files)
}
