//! Bulk renaming: sequential keyword names or explicit from/to pairs

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ops::rename_file;
use crate::error::{PrepError, Result};

/// Rename a single file, passing OS errors through
pub fn rename(from_path: &Path, to_path: &Path) -> Result<()> {
    rename_file(from_path, to_path)
}

/// Compute `<dir>/<keyword>_<index>.<ext>` for a file
///
/// The extension is whatever follows the last `.` of the file name.
pub fn keyword_target(path: &Path, keyword: &str, index: usize) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PrepError::InvalidFileName(path.to_path_buf()))?;

    let (_, ext) = file_name
        .rsplit_once('.')
        .ok_or_else(|| PrepError::MissingExtension(path.to_path_buf()))?;

    let new_name = format!("{}_{}.{}", keyword, index, ext);
    Ok(match path.parent() {
        Some(dir) => dir.join(new_name),
        None => PathBuf::from(new_name),
    })
}

/// Rename every file to `<keyword>_<n>.<ext>` in its own directory
///
/// `n` starts at 1 and follows the order of `paths`. Stops at the first
/// failure; files renamed before it keep their new names.
pub fn rename_by_keyword<P: AsRef<Path>>(paths: &[P], keyword: &str) -> Result<Vec<PathBuf>> {
    let mut renamed = Vec::with_capacity(paths.len());

    for (i, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let target = keyword_target(path, keyword, i + 1)?;
        rename_file(path, &target)?;
        renamed.push(target);
    }

    log::info!("Renamed {} files with keyword '{}'", renamed.len(), keyword);
    Ok(renamed)
}

/// One explicit rename
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenamePair {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Ordered list of renames, usually loaded from a JSON file
///
/// ```json
/// { "renames": [ { "from": "a/x.wav", "to": "a/hungry_1.wav" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenamePlan {
    #[serde(default)]
    pub renames: Vec<RenamePair>,
}

impl RenamePlan {
    /// Load a rename plan from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Resolve relative paths in the plan against `base`
    pub fn resolved_against(mut self, base: &Path) -> Self {
        for pair in &mut self.renames {
            if pair.from.is_relative() {
                pair.from = base.join(&pair.from);
            }
            if pair.to.is_relative() {
                pair.to = base.join(&pair.to);
            }
        }
        self
    }

    pub fn apply(&self) -> Result<usize> {
        rename_pairs(&self.renames)
    }
}

/// Apply from/to renames in order, stopping at the first failure
pub fn rename_pairs(pairs: &[RenamePair]) -> Result<usize> {
    for pair in pairs {
        rename_file(&pair.from, &pair.to)?;
    }
    log::info!("Applied {} renames", pairs.len());
    Ok(pairs.len())
}
